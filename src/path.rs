//! Path utilities for document addressing

/// Document shown when an address or link names no document.
pub const DEFAULT_DOC: &str = "index";

/// Suffix of documentation files in a source repository.
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Canonicalizes an untrusted document path into a safe relative path.
///
/// Strips every `..` occurrence textually (not only whole segments),
/// collapses runs of `/`, drops one leading and one trailing `/` and
/// removes any character outside `[A-Za-z0-9/_.-]`. Falls back to
/// [`DEFAULT_DOC`] when nothing survives.
///
/// The filtering steps are repeated until the path stops changing, so the
/// result is a fixed point: removing a character can never create a new
/// `..` or `//` sequence in the returned string.
///
/// # Arguments
///
/// * `raw`: Path as typed by a user or written by a document author
///
/// # Returns
///
/// Relative path without traversal segments or leading slash
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.to_string();

    loop {
        let next = sanitize_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }

    if current.is_empty() {
        DEFAULT_DOC.to_string()
    } else {
        current
    }
}

fn sanitize_pass(raw: &str) -> String {
    let stripped = raw.replace("..", "");

    let mut collapsed = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }

    let trimmed = collapsed.strip_prefix('/').unwrap_or(&collapsed);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    trimmed
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '.' | '-'))
        .collect()
}

/// Converts a document path into the Markdown file name it is stored as.
///
/// Sanitizes the path and appends `.md` unless already present.
pub fn to_file(doc_path: &str) -> String {
    let path = sanitize(doc_path);
    if path.ends_with(MARKDOWN_SUFFIX) {
        path
    } else {
        format!("{}{}", path, MARKDOWN_SUFFIX)
    }
}

/// Joins a source subdirectory with a file path inside it.
///
/// Surrounding whitespace and trailing slashes of `subdir` are ignored; an
/// empty subdirectory yields `file` unchanged.
pub fn content_path(subdir: &str, file: &str) -> String {
    let sub = subdir.trim().trim_end_matches('/');
    if sub.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", sub, file)
    }
}

/// Splits path into its non-empty `/` separated components.
pub fn components(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
