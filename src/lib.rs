//! Viewer for Markdown documentation stored in GitHub repositories.
//!
//! Documents are addressed through one path namespace
//! (`/s/<source>/<document>`). Addresses decode to routes, document paths
//! are sanitized before they reach the remote host, rendered documents are
//! grouped into heading blocks and their relative links are bound back to
//! viewer addresses.

mod assets;
pub mod components;
mod config;
pub mod dom;
mod error;
pub mod fetch;
mod markdown;
pub mod pages;
pub mod path;
pub mod registry;
pub mod rewire;
pub mod route;
pub mod segment;
pub mod viewer;

pub use config::{AddSource, Command, Config, SourcesCommand};
pub use dom::{Binding, Node, Tag};
pub use error::{Ignored, ViewerError};
pub use fetch::{DocumentFetcher, FetchError, FetchRequest, GitHubFetcher, MemoryFetcher};
pub use markdown::{LinkResolver, MarkdownRenderer, resolve_relative};
pub use registry::{JsonFileRegistry, MemoryRegistry, NewSource, Source, SourceRegistry, register};
pub use rewire::{LinkContext, LinkTarget, rewire};
pub use route::{NavigationState, Route, decode};
pub use segment::{Block, segment};
pub use viewer::{DocumentPage, Page, Viewer};
