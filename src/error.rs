//! Error types for the viewer.

use std::path::PathBuf;

use crate::fetch::FetchError;

/// Error shown to the user in place of a page.
///
/// None of these end the session: every variant renders as an error page
/// with a way back to the landing page.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ViewerError {
    /// Document route names a source that is not registered.
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    /// Remote document could not be retrieved.
    #[error("Document not found or you don't have access ({path}): {source}")]
    DocumentFetchFailed {
        /// Source the document was requested from.
        source_id: String,
        /// Content path requested from the remote host.
        path: String,
        #[source]
        source: FetchError,
    },

    /// Registration would reuse an existing source id.
    #[error("A source with id '{0}' already exists")]
    DuplicateSourceId(String),

    /// Registration URL does not name a GitHub repository.
    #[error("Not a valid GitHub repo URL (e.g. https://github.com/owner/repo): {0}")]
    InvalidRepositoryUrl(String),

    /// Registry file exists but cannot be read, so it is left untouched.
    #[error("Source registry is unreadable, refusing to overwrite: {}", .0.display())]
    CorruptRegistry(PathBuf),

    /// Registry storage could not be written.
    #[error("Failed to save sources")]
    Storage(#[from] std::io::Error),

    /// Registry could not be serialized.
    #[error("Failed to encode sources")]
    Encode(#[from] serde_json::Error),
}

impl ViewerError {
    /// Source whose root page is a useful way out of this error.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            ViewerError::DocumentFetchFailed { source_id, .. } => Some(source_id),
            _ => None,
        }
    }
}

/// Marker for a registry read failure that was deliberately ignored.
///
/// Returned by [`crate::registry::SourceRegistry::list`] when storage is
/// missing or unreadable; callers treat it as an empty registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("source registry unreadable, treated as empty")]
pub struct Ignored;
