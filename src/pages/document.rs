//! Document page with segmented markdown content

use maud::{Markup, html};

use crate::components::blocks::blocks;
use crate::components::layout::page_wrapper;
use crate::components::nav::breadcrumb;
use crate::viewer::DocumentPage;

/// Generates HTML page for a rendered document
///
/// Places breadcrumb navigation above the document blocks. Anchors bound
/// to viewer navigation carry their target address in `data-nav` next to
/// the original `href`.
///
/// # Arguments
///
/// * `document`: Loaded document with rewired blocks
///
/// # Returns
///
/// Complete HTML markup for the document page
pub fn generate(document: &DocumentPage) -> Markup {
    let title = document
        .blocks
        .iter()
        .find_map(|block| block.heading_text())
        .unwrap_or_else(|| document.doc_path.clone());

    page_wrapper(
        &title,
        html! {
            (breadcrumb(&document.source.name, &document.source.id, &document.doc_path))
            main {
                (blocks(&document.blocks))
            }
        },
    )
}
