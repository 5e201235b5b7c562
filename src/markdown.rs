//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! This module renders markdown with comrak into the restricted node tree
//! of [`crate::dom`] and resolves links between documents of one source.

mod links;
mod renderer;

pub use links::{LinkResolver, resolve_relative};
pub use renderer::MarkdownRenderer;
