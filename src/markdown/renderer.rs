//! Markdown rendering into the sanitized node tree.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};
use tracing::debug;

use crate::dom::{Node, Tag};

/// Href schemes an anchor may keep.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Renders markdown to the restricted document node tree.
///
/// Parses GitHub Flavored Markdown (tables, strikethrough, autolinks, task
/// lists) and maps the syntax tree onto the allowed tags only:
/// - Headings, paragraphs, line breaks, lists, code, blockquotes,
///   emphasis, rules and table elements map to their tag
/// - Links keep their `href` and nothing else; hrefs with a scripting or
///   other unknown scheme are dropped, keeping the link text
/// - Raw HTML, images and front matter are dropped
/// - Every other construct is unwrapped: its tag disappears, its content
///   stays
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    pub fn new() -> Self {
        let mut options = Options::default();

        // Extension options (GFM features)
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.front_matter_delimiter = Some("---".to_string());

        Self { options }
    }

    /// Renders markdown content to top-level document nodes.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Sanitized top-level nodes in document order
    pub fn render(&self, content: &str) -> Vec<Node> {
        let arena = Arena::new();
        let root = parse_document(&arena, content, &self.options);
        let nodes = convert_children(root, false);
        debug!(nodes = nodes.len(), "rendered markdown");
        nodes
    }

    /// Renders markdown content straight to sanitized HTML.
    pub fn render_html(&self, content: &str) -> String {
        crate::dom::to_html(&self.render(content))
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_children<'a>(node: &'a AstNode<'a>, tight: bool) -> Vec<Node> {
    let mut out = Vec::new();
    for child in node.children() {
        convert(child, tight, &mut out);
    }
    out
}

/// Converts one syntax node, appending results to `out`.
///
/// `tight` marks paragraphs inside tight list items, which render without
/// a `<p>` wrapper.
fn convert<'a>(node: &'a AstNode<'a>, tight: bool, out: &mut Vec<Node>) {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Heading(heading) => match Tag::heading(heading.level) {
            Some(tag) => out.push(Node::element(tag, convert_children(node, false))),
            None => out.extend(convert_children(node, false)),
        },
        NodeValue::Paragraph if tight => out.extend(convert_children(node, false)),
        NodeValue::Paragraph => out.push(Node::element(Tag::P, convert_children(node, false))),
        NodeValue::Text(text) => out.push(Node::text(text.clone())),
        NodeValue::SoftBreak => out.push(Node::text("\n")),
        NodeValue::LineBreak => out.push(Node::element(Tag::Br, Vec::new())),
        NodeValue::Code(code) => out.push(Node::element(
            Tag::Code,
            vec![Node::text(code.literal.clone())],
        )),
        NodeValue::CodeBlock(block) => out.push(Node::element(
            Tag::Pre,
            vec![Node::element(
                Tag::Code,
                vec![Node::text(block.literal.clone())],
            )],
        )),
        NodeValue::BlockQuote => {
            out.push(Node::element(Tag::Blockquote, convert_children(node, false)))
        }
        NodeValue::List(list) => {
            let tag = match list.list_type {
                ListType::Bullet => Tag::Ul,
                ListType::Ordered => Tag::Ol,
            };
            out.push(Node::element(tag, convert_children(node, list.tight)));
        }
        NodeValue::Item(_) | NodeValue::TaskItem(..) => {
            out.push(Node::element(Tag::Li, convert_children(node, tight)))
        }
        NodeValue::ThematicBreak => out.push(Node::element(Tag::Hr, Vec::new())),
        NodeValue::Emph => out.push(Node::element(Tag::Em, convert_children(node, false))),
        NodeValue::Strong => out.push(Node::element(Tag::Strong, convert_children(node, false))),
        NodeValue::Link(link) => {
            let href = is_safe_href(&link.url).then(|| link.url.clone());
            out.push(Node::anchor(href, convert_children(node, false)));
        }
        NodeValue::Table(..) => out.push(convert_table(node)),
        NodeValue::Image(_)
        | NodeValue::HtmlBlock(_)
        | NodeValue::HtmlInline(_)
        | NodeValue::FrontMatter(_) => {}
        _ => out.extend(convert_children(node, tight)),
    }
}

/// Converts a table, grouping the header row into `thead` and the
/// remaining rows into `tbody`.
fn convert_table<'a>(node: &'a AstNode<'a>) -> Node {
    let mut head = Vec::new();
    let mut body = Vec::new();

    for row in node.children() {
        let header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
        let cell_tag = if header { Tag::Th } else { Tag::Td };

        let cells = row
            .children()
            .map(|cell| Node::element(cell_tag, convert_children(cell, false)))
            .collect();
        let tr = Node::element(Tag::Tr, cells);

        if header {
            head.push(tr);
        } else {
            body.push(tr);
        }
    }

    let mut sections = Vec::new();
    if !head.is_empty() {
        sections.push(Node::element(Tag::Thead, head));
    }
    if !body.is_empty() {
        sections.push(Node::element(Tag::Tbody, body));
    }
    Node::element(Tag::Table, sections)
}

/// Whether href may be kept on an anchor.
///
/// Relative hrefs and fragments are always kept; hrefs with a scheme keep
/// only http, https and mailto.
fn is_safe_href(href: &str) -> bool {
    let trimmed = href.trim();
    let scheme_end = trimmed.find(':');
    let path_start = trimmed.find(['/', '?', '#']);

    match (scheme_end, path_start) {
        (Some(colon), Some(path)) if path < colon => true,
        (Some(colon), _) => {
            let scheme = &trimmed[..colon];
            ALLOWED_SCHEMES
                .iter()
                .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
        }
        (None, _) => true,
    }
}
