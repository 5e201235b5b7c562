//! Address decoding and navigation state.
//!
//! The whole viewer state is one address string such as `/s/guide/setup`.
//! [`decode`] turns it into a [`Route`]; [`NavigationState`] owns the
//! current address and the queue of navigation requests emitted by links.

use std::collections::VecDeque;

use tracing::debug;

use crate::path::{self, DEFAULT_DOC};

/// First address segment marking a document route.
pub const SOURCE_MARKER: &str = "s";

/// Href prefix of links that address the viewer directly.
pub const INTERNAL_PREFIX: &str = "#/";

/// Decoded intent of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Source overview and registration page.
    Landing,
    /// One document inside a registered source.
    Document { source_id: String, doc_path: String },
}

impl Route {
    /// Encodes route back into an address that decodes to the same route.
    pub fn address(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Document {
                source_id,
                doc_path,
            } => document_address(source_id, doc_path),
        }
    }
}

/// Decodes an address into a route.
///
/// Leading `#`, surrounding slashes and whitespace are ignored. Addresses of
/// the shape `s/<source>[/<doc path>]` become [`Route::Document`] with the
/// document path sanitized and defaulting to [`DEFAULT_DOC`]; every other
/// address becomes [`Route::Landing`].
pub fn decode(address: &str) -> Route {
    let trimmed = address.trim();
    let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let trimmed = trimmed.trim_matches('/').trim();
    let normalized = if trimmed.is_empty() {
        DEFAULT_DOC
    } else {
        trimmed
    };

    let segments = path::components(normalized);

    match segments.as_slice() {
        [marker, source_id, rest @ ..] if *marker == SOURCE_MARKER => {
            let doc_path = if rest.is_empty() {
                DEFAULT_DOC.to_string()
            } else {
                path::sanitize(&rest.join("/"))
            };
            Route::Document {
                source_id: (*source_id).to_string(),
                doc_path,
            }
        }
        _ => Route::Landing,
    }
}

/// Builds the address of a document inside a source.
pub fn document_address(source_id: &str, doc_path: &str) -> String {
    format!("/{}/{}/{}", SOURCE_MARKER, source_id, doc_path)
}

/// Builds the address of a source's root document.
pub fn source_root_address(source_id: &str) -> String {
    format!("/{}/{}/", SOURCE_MARKER, source_id)
}

/// Current address plus pending navigation requests.
///
/// Links and user input emit addresses with [`navigate`](Self::navigate);
/// the page loop consumes them with [`settle`](Self::settle). Only the newest
/// pending request is honored, so a burst of navigations renders once, for
/// the address requested last.
#[derive(Debug, Clone)]
pub struct NavigationState {
    current: String,
    pending: VecDeque<String>,
}

impl NavigationState {
    /// Creates navigation state positioned at `address`.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            current: address.into(),
            pending: VecDeque::new(),
        }
    }

    /// Address currently displayed.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Route of the current address.
    pub fn route(&self) -> Route {
        decode(&self.current)
    }

    /// Emits a navigation request.
    ///
    /// Requesting the current address again is allowed and re-renders it.
    pub fn navigate(&mut self, address: impl Into<String>) {
        let address = address.into();
        debug!(address = %address, "navigation requested");
        self.pending.push_back(address);
    }

    /// Removes and returns the oldest pending request.
    pub fn next_event(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// Number of requests not yet consumed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Applies the newest pending request and discards the rest.
    ///
    /// # Returns
    ///
    /// New current address, or `None` when nothing was pending
    pub fn settle(&mut self) -> Option<&str> {
        let mut latest = None;
        while let Some(address) = self.next_event() {
            if latest.is_some() {
                debug!("superseding stale navigation request");
            }
            latest = Some(address);
        }

        let address = latest?;
        self.current = address;
        Some(&self.current)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(source_id: &str, doc_path: &str) -> Route {
        Route::Document {
            source_id: source_id.to_string(),
            doc_path: doc_path.to_string(),
        }
    }

    #[test]
    fn test_decode_default_addresses_agree() {
        // Arrange
        let empty = decode("");
        let slash = decode("/");
        let index = decode("index");

        // Assert
        assert_eq!(empty, slash);
        assert_eq!(slash, index);
        assert_eq!(empty, Route::Landing);
    }

    #[test]
    fn test_decode_source_root() {
        assert_eq!(decode("s/foo"), document("foo", DEFAULT_DOC));
        assert_eq!(decode("/s/foo/"), document("foo", DEFAULT_DOC));
        assert_eq!(decode("#/s/foo/"), document("foo", DEFAULT_DOC));
    }

    #[test]
    fn test_decode_nested_document() {
        assert_eq!(decode("s/foo/bar/baz"), document("foo", "bar/baz"));
        assert_eq!(decode("  /s//foo//bar/baz/  "), document("foo", "bar/baz"));
    }

    #[test]
    fn test_decode_sanitizes_doc_path() {
        assert_eq!(decode("s/foo/../../etc"), document("foo", "etc"));
        assert_eq!(decode("s/foo/..%2Fsecret"), document("foo", "2Fsecret"));
    }

    #[test]
    fn test_decode_marker_without_source_is_landing() {
        assert_eq!(decode("s"), Route::Landing);
        assert_eq!(decode("/s/"), Route::Landing);
    }

    #[test]
    fn test_decode_unknown_shapes_are_landing() {
        assert_eq!(decode("docs/guide"), Route::Landing);
        assert_eq!(decode("S/foo"), Route::Landing);
        assert_eq!(decode("###"), Route::Landing);
    }

    #[test]
    fn test_decode_idempotent() {
        for address in ["", "s/foo", "/s/a/b/c", "x/y", "#/s/z/"] {
            assert_eq!(decode(address), decode(address));
        }
    }

    #[test]
    fn test_route_address_round_trip() {
        let routes = [
            Route::Landing,
            document("foo", DEFAULT_DOC),
            document("foo", "guide/setup"),
        ];

        for route in routes {
            assert_eq!(decode(&route.address()), route);
        }
    }

    #[test]
    fn test_addresses() {
        assert_eq!(document_address("docs", "guide/intro"), "/s/docs/guide/intro");
        assert_eq!(source_root_address("docs"), "/s/docs/");
    }

    #[test]
    fn test_navigation_settle_keeps_latest() {
        // Arrange
        let mut nav = NavigationState::new("/");
        nav.navigate("/s/a/");
        nav.navigate("/s/b/");
        nav.navigate("/s/c/intro");

        // Act
        let settled = nav.settle().map(str::to_string);

        // Assert
        assert_eq!(settled.as_deref(), Some("/s/c/intro"));
        assert_eq!(nav.current(), "/s/c/intro");
        assert_eq!(nav.pending(), 0);
        assert_eq!(nav.route(), document("c", "intro"));
    }

    #[test]
    fn test_navigation_settle_without_events() {
        let mut nav = NavigationState::new("/s/a/");

        assert!(nav.settle().is_none());
        assert_eq!(nav.current(), "/s/a/");
    }

    #[test]
    fn test_navigation_events_in_order() {
        let mut nav = NavigationState::default();
        nav.navigate("/one");
        nav.navigate("/two");

        assert_eq!(nav.next_event().as_deref(), Some("/one"));
        assert_eq!(nav.next_event().as_deref(), Some("/two"));
        assert_eq!(nav.next_event(), None);
    }
}
