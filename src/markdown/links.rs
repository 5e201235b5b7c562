//! Link resolution for references between documents of one source.

use crate::path::{DEFAULT_DOC, MARKDOWN_SUFFIX};

/// Resolves relative links found in a document to document paths.
///
/// Transforms links relative to the displayed document (./setup.md,
/// ../intro) into suffix-free document paths inside the same source
/// (guide/setup, intro). Fragment, absolute and root-relative links are
/// left for other rules and returned unchanged.
#[derive(Debug, Clone)]
pub struct LinkResolver {
    current_path: String,
}

impl LinkResolver {
    /// Creates link resolver for the document displayed at `current_path`.
    ///
    /// # Arguments
    ///
    /// * `current_path`: Document path of the displayed document (no `.md`)
    pub fn new(current_path: impl Into<String>) -> Self {
        Self {
            current_path: current_path.into(),
        }
    }

    /// Document path the resolver resolves against.
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Resolves link to a document path.
    ///
    /// Handles different link types:
    /// - Empty links and fragments (#section) remain unchanged
    /// - Scheme links (http://, https://) remain unchanged
    /// - Root-relative links (/other) remain unchanged
    /// - Sibling paths (./file.md, file.md) resolve next to current document
    /// - Parent paths (../file.md) resolve relative to current document;
    ///   climbing above the source root stops at the root
    ///
    /// # Arguments
    ///
    /// * `href`: Link href from rendered document
    ///
    /// # Returns
    ///
    /// Resolved document path without `.md` suffix, or `href` unchanged
    pub fn resolve(&self, href: &str) -> String {
        if !is_relative(href) {
            return href.to_string();
        }

        // Directory of current document: drop final segment
        let current_dir = match self.current_path.rfind('/') {
            Some(pos) => &self.current_path[..pos],
            None => "",
        };

        let joined = format!("{}/{}", current_dir, href);
        let normalized = normalize_segments(&joined).join("/");
        let resolved = strip_markdown_suffix(&normalized);

        if resolved.is_empty() {
            DEFAULT_DOC.to_string()
        } else {
            resolved.to_string()
        }
    }
}

/// Resolves `href` against the document at `current_path`.
///
/// Shorthand for [`LinkResolver::resolve`].
pub fn resolve_relative(current_path: &str, href: &str) -> String {
    LinkResolver::new(current_path).resolve(href)
}

/// Whether href is eligible for relative resolution.
fn is_relative(href: &str) -> bool {
    !(href.is_empty() || href.starts_with('#') || href.starts_with("http") || href.starts_with('/'))
}

/// Applies `.` and `..` segments.
///
/// A `..` with nothing left to remove is ignored instead of escaping the
/// source root.
fn normalize_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        match segment {
            ".." => {
                segments.pop();
            }
            "." => {}
            _ => segments.push(segment),
        }
    }

    segments
}

fn strip_markdown_suffix(path: &str) -> &str {
    let split = path.len().saturating_sub(MARKDOWN_SUFFIX.len());
    match (path.get(..split), path.get(split..)) {
        (Some(stem), Some(suffix)) if suffix.eq_ignore_ascii_case(MARKDOWN_SUFFIX) => stem,
        _ => path,
    }
}
