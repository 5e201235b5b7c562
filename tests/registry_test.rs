//! Source registry persistence tests.
//!
//! Covers the JSON file registry against real files in temporary
//! directories: missing and corrupt storage, registration, id collisions
//! and reading back what was written.

mod common;

use anyhow::Result;
use docsview::registry::SourceRegistry;
use docsview::{
    Ignored, JsonFileRegistry, MemoryFetcher, NewSource, Page, Viewer, ViewerError, register,
};
use std::fs;

fn form(name: &str, url: &str) -> NewSource {
    NewSource {
        name: name.to_string(),
        repo_url: url.to_string(),
        ..NewSource::default()
    }
}

/// Tests that a registry without a file is empty.
#[test]
fn test_missing_file_is_empty() -> Result<()> {
    let (_dir, registry) = common::temp_registry()?;

    assert_eq!(registry.list(), Ok(Vec::new()));
    assert!(registry.get_by_id("docs").is_none());

    Ok(())
}

/// Tests that unreadable storage is ignored and reads as empty.
#[test]
fn test_corrupt_file_is_ignored() -> Result<()> {
    // Arrange
    let (_dir, registry) = common::temp_registry()?;
    fs::create_dir_all(registry.path().parent().expect("registry has parent"))?;
    fs::write(registry.path(), "{ not json")?;

    // Act & Assert
    assert_eq!(registry.list(), Err(Ignored));
    assert!(registry.list_or_empty().is_empty());

    Ok(())
}

/// Tests that adding to an unreadable registry keeps its stored bytes.
#[test]
fn test_add_to_corrupt_file_keeps_contents() -> Result<()> {
    // Arrange
    let (_dir, registry) = common::temp_registry()?;
    fs::create_dir_all(registry.path().parent().expect("registry has parent"))?;
    let corrupt = r#"[{"id":"keep","name":"Keep","owner":"acme","repo":"handbook","ref":"main"},]"#;
    fs::write(registry.path(), corrupt)?;

    // Act
    let added = registry.add(common::sample_source("new", ""));
    let registered = register(&registry, &form("Docs", "https://github.com/acme/docs"));

    // Assert
    assert!(
        matches!(added, Err(ViewerError::CorruptRegistry(ref path)) if path == registry.path()),
        "{:?}",
        added
    );
    assert!(matches!(registered, Err(ViewerError::CorruptRegistry(_))));
    assert_eq!(fs::read_to_string(registry.path())?, corrupt);

    Ok(())
}

/// Tests that registration creates the file and survives a reopen.
#[test]
fn test_register_persists_source() -> Result<()> {
    // Arrange
    let (_dir, registry) = common::temp_registry()?;
    let mut input = form("Team Handbook", "https://github.com/acme/handbook.git");
    input.branch = "docs-v2".to_string();
    input.subdir = "/docs/".to_string();
    input.token = "secret".to_string();

    // Act
    let source = register(&registry, &input)?;
    let reopened = JsonFileRegistry::new(registry.path());

    // Assert
    assert_eq!(source.id, "team-handbook");
    assert_eq!(source.repository(), "acme/handbook");
    assert_eq!(source.subdir, "docs");

    let stored = reopened.get_by_id("team-handbook").expect("source persisted");
    assert_eq!(stored, source);
    assert_eq!(stored.git_ref, "docs-v2");
    assert_eq!(stored.token.as_deref(), Some("secret"));

    let raw = fs::read_to_string(registry.path())?;
    assert!(raw.contains("\"ref\": \"docs-v2\""), "{}", raw);

    Ok(())
}

/// Tests that colliding names receive numbered ids.
#[test]
fn test_register_same_name_twice() -> Result<()> {
    let (_dir, registry) = common::temp_registry()?;

    let first = register(&registry, &form("Docs", "https://github.com/acme/a"))?;
    let second = register(&registry, &form("Docs", "https://github.com/acme/b"))?;

    assert_eq!(first.id, "docs");
    assert_eq!(second.id, "docs1");
    assert_eq!(registry.list_or_empty().len(), 2);

    Ok(())
}

/// Tests that explicit duplicate ids are rejected without touching storage.
#[test]
fn test_add_duplicate_id_rejected() -> Result<()> {
    // Arrange
    let (_dir, registry) = common::temp_registry()?;
    registry.add(common::sample_source("docs", ""))?;
    let before = fs::read_to_string(registry.path())?;

    // Act
    let result = registry.add(common::sample_source("docs", "other"));

    // Assert
    assert!(matches!(result, Err(ViewerError::DuplicateSourceId(ref id)) if id == "docs"));
    assert_eq!(fs::read_to_string(registry.path())?, before);

    Ok(())
}

/// Tests that non-GitHub URLs are refused.
#[test]
fn test_register_invalid_url() -> Result<()> {
    let (_dir, registry) = common::temp_registry()?;

    let result = register(&registry, &form("", "https://gitlab.com/acme/handbook"));

    assert!(matches!(result, Err(ViewerError::InvalidRepositoryUrl(_))));
    assert!(!registry.path().exists());

    Ok(())
}

/// Tests that a file-backed registry drives the viewer.
#[test]
fn test_viewer_reads_file_registry() -> Result<()> {
    // Arrange
    let (_dir, registry) = common::temp_registry()?;
    registry.add(common::sample_source("docs", "docs"))?;
    let fetcher = MemoryFetcher::new().with_file("docs/index.md", "# Home\n");
    let viewer = Viewer::new(registry, fetcher);

    // Act
    let landing = viewer.open("#/");
    let document = viewer.open("#/s/docs");

    // Assert
    assert!(matches!(landing, Page::Landing { ref sources } if sources.len() == 1));
    assert!(matches!(document, Page::Document(ref d) if d.doc_path == "index"));

    Ok(())
}
