//! Registered source listing component

use maud::{Markup, html};

use super::nav::internal_href;
use crate::registry::Source;
use crate::route;

/// Renders the list of registered sources
///
/// Each entry links to the source's root document and shows the backing
/// `owner/repo` next to the name.
///
/// # Arguments
///
/// * `sources`: Registered sources in registry order
///
/// # Returns
///
/// Source list markup, or an empty state hint when nothing is registered
pub fn source_list(sources: &[Source]) -> Markup {
    html! {
        @if sources.is_empty() {
            p class="empty-state" {
                "No sources yet. Add a GitHub repo with "
                code { "docsview sources add" }
                ". You can only add repos you have access to (public, or private with a token)."
            }
        } @else {
            p { "Your sources:" }
            ul class="source-list" {
                @for source in sources {
                    @let address = route::source_root_address(&source.id);
                    li {
                        a href=(internal_href(&address)) data-nav=(address) { (source.name) }
                        " "
                        span class="status" { "(" (source.repository()) ")" }
                    }
                }
            }
        }
    }
}
