//! CSS and script asset bundling

const BASE: &str = include_str!("../assets/base.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");
const BLOCKS: &str = include_str!("../assets/blocks.css");
const NAV: &str = include_str!("../assets/nav.js");

/// Returns the stylesheet inlined into every page.
///
/// Pages are written as single self-contained files, so the parts are
/// bundled into one string instead of separate asset files.
pub fn stylesheet() -> String {
    [BASE, MARKDOWN, BLOCKS].join("\n")
}

/// Returns the click handler for anchors bound to viewer addresses.
pub fn script() -> &'static str {
    NAV
}
