//! Page footer component

use maud::{Markup, html};

/// Renders the footer shown below every page.
pub fn footer() -> Markup {
    html! {
        footer {
            "Rendered by docsview " (env!("CARGO_PKG_VERSION"))
        }
    }
}
