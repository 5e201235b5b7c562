//! Shared test utilities for integration tests.
//!
//! Provides a sample documentation source, an in-memory fetcher serving its
//! documents and helpers for registry files in temporary directories.

#![allow(dead_code)]

use anyhow::Result;
use docsview::{JsonFileRegistry, MemoryFetcher, Source};
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates source `id` reading documents from `acme/handbook` under `subdir`.
pub fn sample_source(id: &str, subdir: &str) -> Source {
    Source {
        id: id.to_string(),
        name: format!("{} handbook", id),
        owner: "acme".to_string(),
        repo: "handbook".to_string(),
        git_ref: "main".to_string(),
        subdir: subdir.to_string(),
        token: None,
    }
}

/// Creates fetcher serving a small handbook under `docs/`.
///
/// Layout:
/// - `docs/index.md`: intro paragraph, then headings linking into `guide/`
/// - `docs/guide/setup.md`: links to siblings, parent, other sources, web
/// - `docs/guide/advanced.md`: table and nested links
pub fn handbook_fetcher() -> MemoryFetcher {
    MemoryFetcher::new()
        .with_file(
            "docs/index.md",
            "Welcome to the handbook.\n\n\
             # Handbook\n\n\
             Start with [setup](guide/setup.md).\n\n\
             ## Elsewhere\n\n\
             - [Other source](#/s/other/)\n\
             - [Mail us](mailto:docs@example.com)\n",
        )
        .with_file(
            "docs/guide/setup.md",
            "# Setup\n\n\
             Read the [intro](../index.md) first, then [advanced](./advanced).\n\n\
             ## Links\n\n\
             See [upstream](https://example.com/setup.md) or [top](#links).\n",
        )
        .with_file(
            "docs/guide/advanced.md",
            "# Advanced\n\n\
             | Topic | Page |\n\
             |-------|------|\n\
             | Setup | [setup](setup.md) |\n\n\
             > Escaping [the root](../../../../secret.md) stops at the root.\n",
        )
}

/// Creates temporary directory and path of a registry file inside it.
///
/// # Errors
///
/// Returns error if the temporary directory cannot be created
pub fn temp_registry() -> Result<(TempDir, JsonFileRegistry)> {
    let dir = TempDir::new()?;
    let path: PathBuf = dir.path().join("config").join("sources.json");
    Ok((dir, JsonFileRegistry::new(path)))
}
