//! Page layout wrapper component

use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::footer::footer;
use crate::assets;

/// Wraps page content with standard HTML structure
///
/// Provides consistent DOCTYPE, html, head, and container structure across
/// all page types. The stylesheet is inlined so every written page is a
/// single self-contained file. The inlined script keeps clicks on bound
/// anchors inside the page instead of following their raw `href`.
///
/// # Arguments
///
/// * `title`: Page title text (without suffix)
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Docs" }
                style { (PreEscaped(assets::stylesheet())) }
            }
            body {
                div class="container" {
                    (body)
                }
                (footer())
                script { (PreEscaped(assets::script())) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wrapper_structure() {
        // Arrange & Act
        let html = page_wrapper("Guide", html! { p { "body" } }).into_string();

        // Assert
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Guide - Docs</title>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("<div class=\"container\"><p>body</p></div>"));
        assert!(html.contains("<footer"));
        assert!(html.contains("<script>"));
        assert!(html.contains("a[data-nav]"));
    }

    #[test]
    fn test_page_wrapper_escapes_title() {
        let html = page_wrapper("<x>", html! {}).into_string();

        assert!(html.contains("<title>&lt;x&gt; - Docs</title>"));
    }
}
