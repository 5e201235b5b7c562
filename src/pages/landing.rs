//! Landing page listing registered sources

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::components::source_list::source_list;
use crate::registry::Source;

/// Generates the landing page
///
/// Shows every registered source with a link to its root document.
///
/// # Arguments
///
/// * `sources`: Registered sources
///
/// # Returns
///
/// Complete HTML markup for the landing page
pub fn generate(sources: &[Source]) -> Markup {
    page_wrapper(
        "Docs",
        html! {
            h1 { "Docs" }
            (source_list(sources))
        },
    )
}
