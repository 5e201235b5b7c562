//! Registered documentation sources.
//!
//! A source is a GitHub repository (optionally narrowed to a subdirectory)
//! that documents are read from. Sources are kept in a [`SourceRegistry`];
//! [`JsonFileRegistry`] stores them as a JSON array on disk.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{Ignored, ViewerError};

/// Branch used when registration names none.
pub const DEFAULT_BRANCH: &str = "main";

/// Id used when a name slugs to nothing.
const FALLBACK_SLUG: &str = "src";

/// Remote documentation root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Unique slug addressing the source.
    pub id: String,
    /// Display name.
    pub name: String,
    pub owner: String,
    pub repo: String,
    /// Branch, tag or commit.
    #[serde(rename = "ref", default)]
    pub git_ref: String,
    /// Directory inside the repository holding the documents.
    #[serde(default)]
    pub subdir: String,
    /// Access token for private repositories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Source {
    /// `owner/repo` label.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Store of registered sources.
pub trait SourceRegistry {
    /// Lists all sources.
    ///
    /// # Errors
    ///
    /// Returns [`Ignored`] when storage cannot be read or parsed. This is
    /// never fatal; see [`list_or_empty`](Self::list_or_empty).
    fn list(&self) -> Result<Vec<Source>, Ignored>;

    /// Adds a source.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::DuplicateSourceId`] when the id is taken,
    /// [`ViewerError::CorruptRegistry`] when existing storage is unreadable,
    /// or a storage error when the registry cannot be saved.
    fn add(&self, source: Source) -> Result<(), ViewerError>;

    /// Lists all sources, treating unreadable storage as empty.
    fn list_or_empty(&self) -> Vec<Source> {
        self.list().unwrap_or_default()
    }

    /// Looks up a source by id.
    fn get_by_id(&self, id: &str) -> Option<Source> {
        self.list_or_empty().into_iter().find(|s| s.id == id)
    }
}

/// Registry persisted as a JSON array in one file.
///
/// The file is read fresh on every call, so edits by other processes are
/// picked up on the next navigation.
#[derive(Debug, Clone)]
pub struct JsonFileRegistry {
    path: PathBuf,
}

impl JsonFileRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the registry file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceRegistry for JsonFileRegistry {
    fn list(&self) -> Result<Vec<Source>, Ignored> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no registry file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read registry");
                return Err(Ignored);
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to parse registry");
            Ignored
        })
    }

    fn add(&self, source: Source) -> Result<(), ViewerError> {
        // Never write over storage that could not be read
        let mut sources = self
            .list()
            .map_err(|Ignored| ViewerError::CorruptRegistry(self.path.clone()))?;
        if sources.iter().any(|s| s.id == source.id) {
            return Err(ViewerError::DuplicateSourceId(source.id));
        }
        sources.push(source);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&sources)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Registry held in memory.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    sources: RefCell<Vec<Source>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates registry holding `sources`.
    pub fn with_sources(sources: Vec<Source>) -> Self {
        Self {
            sources: RefCell::new(sources),
        }
    }
}

impl SourceRegistry for MemoryRegistry {
    fn list(&self) -> Result<Vec<Source>, Ignored> {
        Ok(self.sources.borrow().clone())
    }

    fn add(&self, source: Source) -> Result<(), ViewerError> {
        let mut sources = self.sources.borrow_mut();
        if sources.iter().any(|s| s.id == source.id) {
            return Err(ViewerError::DuplicateSourceId(source.id));
        }
        sources.push(source);
        Ok(())
    }
}

/// GitHub repository named by a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

/// Parses a GitHub repository URL into owner and repository.
///
/// Accepts `http(s)://[www.]github.com/<owner>/<repo>[.git][/...]`.
///
/// # Returns
///
/// `None` for other hosts, unparsable input or paths with fewer than two
/// segments
pub fn parse_github_url(input: &str) -> Option<RepositoryRef> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let url = Url::parse(trimmed).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?.to_ascii_lowercase();
    if host != "github.com" && host != "www.github.com" {
        return None;
    }

    let mut parts = url.path().split('/').filter(|s| !s.is_empty());

    let owner = parts.next()?;
    let repo = parts.next()?;
    let repo = repo.strip_suffix(".git").unwrap_or(repo);
    if repo.is_empty() {
        return None;
    }
    Some(RepositoryRef {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

/// Generates a source id unique among `existing`.
///
/// Slugs `name` (or `owner/repo` when the name is blank): lowercase, runs of
/// characters outside `[a-z0-9]` become `-`, edge dashes are trimmed. Taken
/// ids get a numeric suffix: `docs`, `docs1`, `docs2`.
pub fn slug_id(name: &str, owner: &str, repo: &str, existing: &[Source]) -> String {
    let basis = if name.trim().is_empty() {
        format!("{}/{}", owner, repo)
    } else {
        name.to_string()
    };

    let mut slug = String::with_capacity(basis.len());
    for c in basis.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = match slug.trim_matches('-') {
        "" => FALLBACK_SLUG.to_string(),
        trimmed => trimmed.to_string(),
    };

    let taken = |id: &str| existing.iter().any(|s| s.id == id);
    let mut id = slug.clone();
    let mut n = 0;
    while taken(&id) {
        n += 1;
        id = format!("{}{}", slug, n);
    }
    id
}

/// Registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSource {
    /// Display name; defaults to `owner/repo`.
    pub name: String,
    /// GitHub repository URL.
    pub repo_url: String,
    /// Branch; defaults to [`DEFAULT_BRANCH`].
    pub branch: String,
    /// Optional directory inside the repository.
    pub subdir: String,
    /// Optional access token.
    pub token: String,
}

/// Registers a new source from form input.
///
/// # Errors
///
/// Returns [`ViewerError::InvalidRepositoryUrl`] for a non-GitHub URL and
/// whatever [`SourceRegistry::add`] reports.
pub fn register<R: SourceRegistry + ?Sized>(
    registry: &R,
    form: &NewSource,
) -> Result<Source, ViewerError> {
    let parsed = parse_github_url(&form.repo_url)
        .ok_or_else(|| ViewerError::InvalidRepositoryUrl(form.repo_url.clone()))?;

    let name = match form.name.trim() {
        "" => format!("{}/{}", parsed.owner, parsed.repo),
        name => name.to_string(),
    };
    let git_ref = match form.branch.trim() {
        "" => DEFAULT_BRANCH.to_string(),
        branch => branch.to_string(),
    };
    let subdir = form.subdir.trim().trim_matches('/').to_string();
    let token = Some(form.token.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let id = slug_id(&name, &parsed.owner, &parsed.repo, &registry.list_or_empty());
    let source = Source {
        id,
        name,
        owner: parsed.owner,
        repo: parsed.repo,
        git_ref,
        subdir,
        token,
    };

    registry.add(source.clone())?;
    debug!(id = %source.id, "registered source");
    Ok(source)
}
