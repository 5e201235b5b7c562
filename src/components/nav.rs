//! Navigation breadcrumb component

use maud::{Markup, html};

use crate::path;
use crate::route::{self, INTERNAL_PREFIX};

/// Breadcrumb entry; `address` is `None` for the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb<'a> {
    pub label: &'a str,
    pub address: Option<String>,
}

/// Renders breadcrumb navigation
///
/// Displays the source name as root link followed by the components of the
/// document path. Every ancestor links to the document of the same name, as
/// a `#/` address with a `data-nav` binding like rewired document links.
///
/// # Arguments
///
/// * `source_name`: Source display name for the root crumb
/// * `source_id`: Source the document belongs to
/// * `doc_path`: Sanitized document path
///
/// # Returns
///
/// Breadcrumb navigation markup with links and separators
pub fn breadcrumb(source_name: &str, source_id: &str, doc_path: &str) -> Markup {
    let root = route::source_root_address(source_id);
    let crumbs = crumbs(source_id, doc_path);

    html! {
        header {
            nav class="breadcrumb" {
                a href=(internal_href(&root)) data-nav=(root) class="breadcrumb-link" { (source_name) }
                @for crumb in &crumbs {
                    span class="breadcrumb-separator" { "/" }
                    @if let Some(address) = &crumb.address {
                        a href=(internal_href(address)) data-nav=(address) class="breadcrumb-link" { (crumb.label) }
                    } @else {
                        span class="breadcrumb-current" { (crumb.label) }
                    }
                }
            }
        }
    }
}

/// Splits document path into breadcrumb entries.
///
/// Each entry but the last addresses the document named by the path prefix
/// ending at it.
pub fn crumbs<'a>(source_id: &str, doc_path: &'a str) -> Vec<Crumb<'a>> {
    let components = path::components(doc_path);
    let last = components.len().saturating_sub(1);

    components
        .iter()
        .enumerate()
        .map(|(i, label)| Crumb {
            label: *label,
            address: (i < last)
                .then(|| route::document_address(source_id, &components[..=i].join("/"))),
        })
        .collect()
}

/// Href for a viewer address, carrying the internal `#/` prefix.
pub fn internal_href(address: &str) -> String {
    format!("{}{}", INTERNAL_PREFIX, address.trim_start_matches('/'))
}
