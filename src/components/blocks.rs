//! Document block component

use maud::{Markup, PreEscaped, html};

use crate::dom;
use crate::segment::Block;

/// Renders segmented document content
///
/// Each block becomes a `div` classed by its heading level. Block nodes are
/// already sanitized, so their serialization is inserted unescaped.
pub fn blocks(blocks: &[Block]) -> Markup {
    html! {
        article class="markdown-body" {
            @for block in blocks {
                div class=(block.class_name()) {
                    (PreEscaped(dom::to_html(block.nodes())))
                }
            }
        }
    }
}
