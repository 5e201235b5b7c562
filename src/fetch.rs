//! Retrieval of raw document text from remote repositories.

use std::collections::HashMap;
use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, info};
use ureq::Agent;

use crate::path;
use crate::registry::Source;

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 30;

/// Characters left unescaped in URL components.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Same as [`COMPONENT`] but keeps path separators.
const PATH: &AsciiSet = &COMPONENT.remove(b'/');

/// Failure reported by a [`DocumentFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Not found")]
    NotFound,

    #[error("Unauthorized (check token)")]
    Unauthorized,

    #[error("Request failed: {0}")]
    Other(String),
}

/// One file to retrieve from a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub git_ref: &'a str,
    /// File path inside the repository.
    pub path: String,
    pub token: Option<&'a str>,
}

impl<'a> FetchRequest<'a> {
    /// Builds request for a document of a source.
    ///
    /// The repository path is the source subdirectory joined with the
    /// sanitized, `.md` suffixed document path. An empty ref falls back to
    /// `HEAD`.
    pub fn for_document(source: &'a Source, doc_path: &str) -> Self {
        let git_ref = match source.git_ref.trim() {
            "" => "HEAD",
            git_ref => git_ref,
        };

        Self {
            owner: &source.owner,
            repo: &source.repo,
            git_ref,
            path: path::content_path(&source.subdir, &path::to_file(doc_path)),
            token: source.token.as_deref().filter(|t| !t.is_empty()),
        }
    }
}

/// Retrieves raw document text.
pub trait DocumentFetcher {
    /// Fetches file content as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] or [`FetchError::Unauthorized`] for
    /// the matching remote answers and [`FetchError::Other`] for any other
    /// failure.
    fn fetch(&self, request: &FetchRequest<'_>) -> Result<String, FetchError>;
}

/// Fetcher backed by the GitHub contents API.
pub struct GitHubFetcher {
    agent: Agent,
    api_url: String,
}

impl GitHubFetcher {
    /// Creates fetcher for `api_url` with request timeout.
    pub fn new(api_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            api_url: api_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Contents API URL of the requested file.
    pub fn contents_url(&self, request: &FetchRequest<'_>) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.api_url,
            utf8_percent_encode(request.owner, COMPONENT),
            utf8_percent_encode(request.repo, COMPONENT),
            utf8_percent_encode(&request.path, PATH),
            utf8_percent_encode(request.git_ref, COMPONENT),
        )
    }
}

impl Default for GitHubFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, Duration::from_secs(DEFAULT_TIMEOUT))
    }
}

impl DocumentFetcher for GitHubFetcher {
    fn fetch(&self, request: &FetchRequest<'_>) -> Result<String, FetchError> {
        let url = self.contents_url(request);

        info!("Fetching {}", url);

        let mut builder = self
            .agent
            .get(&url)
            .header("Accept", "application/vnd.github.raw")
            .header("User-Agent", concat!("docsview/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = request.token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder
            .call()
            .map_err(|e| FetchError::Other(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        debug!(status, "contents API answered");

        match status {
            200..=299 => body_reader
                .read_to_string()
                .map_err(|e| FetchError::Other(e.to_string())),
            401 => Err(FetchError::Unauthorized),
            404 => Err(FetchError::NotFound),
            _ => Err(FetchError::Other(format!("HTTP {}", status))),
        }
    }
}

/// In-memory fetcher keyed by repository path.
///
/// Serves documents of every owner, repo and ref from one map; used in
/// tests and for previewing local content.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    files: HashMap<String, String>,
    token: Option<String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds file content under repository path `path`.
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Requires requests to carry `token`.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

impl DocumentFetcher for MemoryFetcher {
    fn fetch(&self, request: &FetchRequest<'_>) -> Result<String, FetchError> {
        if let Some(expected) = &self.token
            && request.token != Some(expected.as_str())
        {
            return Err(FetchError::Unauthorized);
        }

        self.files
            .get(&request.path)
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}
