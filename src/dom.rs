//! Sanitized document node tree.
//!
//! Rendered documents are held as a tree of [`Node`] values restricted to a
//! fixed set of tags. The only attribute an element carries is the `href` of
//! an anchor; navigation bindings are attached next to it, never in place of
//! it.

/// Tags allowed in rendered documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    Br,
    A,
    Ul,
    Ol,
    Li,
    Code,
    Pre,
    Blockquote,
    Strong,
    Em,
    Hr,
    Table,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
}

impl Tag {
    /// Every allowed tag.
    pub const ALL: [Tag; 24] = [
        Tag::H1,
        Tag::H2,
        Tag::H3,
        Tag::H4,
        Tag::H5,
        Tag::H6,
        Tag::P,
        Tag::Br,
        Tag::A,
        Tag::Ul,
        Tag::Ol,
        Tag::Li,
        Tag::Code,
        Tag::Pre,
        Tag::Blockquote,
        Tag::Strong,
        Tag::Em,
        Tag::Hr,
        Tag::Table,
        Tag::Thead,
        Tag::Tbody,
        Tag::Tr,
        Tag::Th,
        Tag::Td,
    ];

    /// Lowercase HTML tag name.
    pub fn name(self) -> &'static str {
        match self {
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::H5 => "h5",
            Tag::H6 => "h6",
            Tag::P => "p",
            Tag::Br => "br",
            Tag::A => "a",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::Code => "code",
            Tag::Pre => "pre",
            Tag::Blockquote => "blockquote",
            Tag::Strong => "strong",
            Tag::Em => "em",
            Tag::Hr => "hr",
            Tag::Table => "table",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
        }
    }

    /// Looks up an allowed tag by name, ignoring case.
    ///
    /// Returns `None` for anything outside the allow list.
    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(name))
    }

    /// Heading tag for level 1-6.
    pub fn heading(level: u8) -> Option<Tag> {
        match level {
            1 => Some(Tag::H1),
            2 => Some(Tag::H2),
            3 => Some(Tag::H3),
            4 => Some(Tag::H4),
            5 => Some(Tag::H5),
            6 => Some(Tag::H6),
            _ => None,
        }
    }

    /// Heading level, or `None` for non-heading tags.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Tag::H1 => Some(1),
            Tag::H2 => Some(2),
            Tag::H3 => Some(3),
            Tag::H4 => Some(4),
            Tag::H5 => Some(5),
            Tag::H6 => Some(6),
            _ => None,
        }
    }

    /// Whether the tag never has children or a closing tag.
    pub fn is_void(self) -> bool {
        matches!(self, Tag::Br | Tag::Hr)
    }
}

/// Navigation target attached to an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Viewer address the anchor navigates to.
    pub address: String,
}

/// Element with an allowed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    /// Link target, only ever set on anchors.
    pub href: Option<String>,
    /// Navigation handler slot, at most one per element.
    pub binding: Option<Binding>,
    pub children: Vec<Node>,
}

/// Node of a rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    /// Creates text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Creates element without attributes.
    pub fn element(tag: Tag, children: Vec<Node>) -> Self {
        Node::Element(Element {
            tag,
            href: None,
            binding: None,
            children,
        })
    }

    /// Creates anchor with optional href.
    pub fn anchor(href: Option<String>, children: Vec<Node>) -> Self {
        Node::Element(Element {
            tag: Tag::A,
            href,
            binding: None,
            children,
        })
    }

    /// Tag of element nodes.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Node::Element(element) => Some(element.tag),
            Node::Text(_) => None,
        }
    }

    /// Heading level when node is an `h1`-`h6` element.
    pub fn heading_level(&self) -> Option<u8> {
        self.tag().and_then(Tag::heading_level)
    }

    /// Concatenated text of node and descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Appends HTML serialization of node to `out`.
    ///
    /// A binding is written as a `data-nav` attribute alongside the
    /// unchanged `href`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag.name());
                if let Some(href) = &element.href {
                    out.push_str(" href=\"");
                    out.push_str(&escape_html(href));
                    out.push('"');
                }
                if let Some(binding) = &element.binding {
                    out.push_str(" data-nav=\"");
                    out.push_str(&escape_html(&binding.address));
                    out.push('"');
                }
                out.push('>');

                if element.tag.is_void() {
                    return;
                }

                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag.name());
                out.push('>');
            }
        }
    }
}

/// Serializes a sequence of sibling nodes to HTML.
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

/// Escapes HTML special characters for text and attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
