//! Inline error page

use maud::{Markup, html};

use crate::components::layout::page_wrapper;
use crate::components::nav::internal_href;
use crate::error::ViewerError;
use crate::route;

/// Generates error page for a failed load
///
/// Always links back to the landing page; fetch failures also link to the
/// root document of their source.
pub fn generate(err: &ViewerError) -> Markup {
    page_wrapper(
        "Error",
        html! {
            div class="error" {
                p { strong { "Error" } }
                p { (err.to_string()) }
                p {
                    @if let Some(source_id) = err.source_id() {
                        @let root = route::source_root_address(source_id);
                        a href=(internal_href(&root)) data-nav=(root) { "Open source root" }
                        " or "
                    }
                    a href="#/" data-nav="/" { "Go home" }
                }
            }
        },
    )
}
