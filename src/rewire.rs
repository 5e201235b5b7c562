//! Binding of document anchors to viewer navigation.
//!
//! Anchors in a freshly rendered document either address the viewer
//! directly (`#/s/other/`) or point at sibling documents of the same source
//! (`../intro.md`). Both kinds get a [`Binding`] carrying the viewer address
//! to navigate to; external, `mailto:` and fragment links stay plain links.
//! Hrefs themselves are never rewritten.

use tracing::trace;

use crate::dom::{Binding, Element, Node, Tag};
use crate::markdown::LinkResolver;
use crate::route::{INTERNAL_PREFIX, document_address};

/// Location of the document whose anchors are rewired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkContext {
    /// Source the document belongs to; `None` for viewer pages such as the
    /// landing page.
    pub source_id: Option<String>,
    /// Document path of the displayed document.
    pub doc_path: String,
}

impl LinkContext {
    /// Context of a document inside a source.
    pub fn document(source_id: impl Into<String>, doc_path: impl Into<String>) -> Self {
        Self {
            source_id: Some(source_id.into()),
            doc_path: doc_path.into(),
        }
    }

    /// Context of a page outside any source.
    pub fn standalone() -> Self {
        Self {
            source_id: None,
            doc_path: crate::path::DEFAULT_DOC.to_string(),
        }
    }
}

/// Anchor that received a navigation binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Visible link text.
    pub text: String,
    /// Href as written in the document.
    pub href: String,
    /// Viewer address the link navigates to.
    pub address: String,
}

/// Computes navigation address for an anchor href.
///
/// # Returns
///
/// Viewer address for internal and same-source links, `None` for links that
/// must stay ordinary links
pub fn target_address(href: &str, context: &LinkContext) -> Option<String> {
    if href.starts_with(INTERNAL_PREFIX) {
        return Some(href['#'.len_utf8()..].to_string());
    }

    let source_id = context.source_id.as_deref()?;
    if href.starts_with("http") || href.starts_with("mailto:") {
        return None;
    }

    let resolved = LinkResolver::new(context.doc_path.as_str()).resolve(href);
    if resolved.is_empty() || resolved == href {
        return None;
    }

    Some(document_address(source_id, &resolved))
}

/// Attaches navigation bindings to anchors, in place.
///
/// Walks the whole tree, so anchors nested in lists, tables and quotes are
/// covered. Anchors that already carry a binding are skipped, which keeps
/// every anchor at one handler no matter how often the tree is rewired.
///
/// # Arguments
///
/// * `nodes`: Rendered document nodes
/// * `context`: Location of the document
///
/// # Returns
///
/// Number of anchors bound by this call
pub fn rewire(nodes: &mut [Node], context: &LinkContext) -> usize {
    nodes
        .iter_mut()
        .map(|node| match node {
            Node::Element(element) => rewire_element(element, context),
            Node::Text(_) => 0,
        })
        .sum()
}

fn rewire_element(element: &mut Element, context: &LinkContext) -> usize {
    let mut bound = 0;

    if element.tag == Tag::A && element.binding.is_none() {
        let address = element
            .href
            .as_deref()
            .and_then(|href| target_address(href, context));

        if let Some(address) = address {
            trace!(href = ?element.href, address = %address, "binding anchor");
            element.binding = Some(Binding { address });
            bound += 1;
        }
    }

    bound + rewire(&mut element.children, context)
}

/// Returns rewired copy of a node tree.
pub fn rewired(mut nodes: Vec<Node>, context: &LinkContext) -> Vec<Node> {
    rewire(&mut nodes, context);
    nodes
}

/// Lists bound anchors in document order.
pub fn bindings(nodes: &[Node]) -> Vec<LinkTarget> {
    let mut targets = Vec::new();
    collect_bindings(nodes, &mut targets);
    targets
}

fn collect_bindings(nodes: &[Node], targets: &mut Vec<LinkTarget>) {
    for node in nodes {
        let Node::Element(element) = node else {
            continue;
        };

        if let (Some(href), Some(binding)) = (&element.href, &element.binding) {
            targets.push(LinkTarget {
                text: node.text_content(),
                href: href.clone(),
                address: binding.address.clone(),
            });
        }

        collect_bindings(&element.children, targets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str) -> Node {
        Node::anchor(Some(href.to_string()), vec![Node::text(href)])
    }

    fn binding_of(node: &Node) -> Option<&str> {
        match node {
            Node::Element(element) => element.binding.as_ref().map(|b| b.address.as_str()),
            Node::Text(_) => None,
        }
    }

    #[test]
    fn test_internal_prefix_navigates_to_remainder() {
        let context = LinkContext::standalone();

        assert_eq!(target_address("#/", &context).as_deref(), Some("/"));
        assert_eq!(
            target_address("#/s/other/guide", &context).as_deref(),
            Some("/s/other/guide")
        );
    }

    #[test]
    fn test_relative_link_resolves_in_source() {
        // Arrange
        let context = LinkContext::document("docs", "guide/setup");

        // Act
        let parent = target_address("../intro.md", &context);
        let sibling = target_address("./advanced", &context);

        // Assert
        assert_eq!(parent.as_deref(), Some("/s/docs/intro"));
        assert_eq!(sibling.as_deref(), Some("/s/docs/guide/advanced"));
    }

    #[test]
    fn test_plain_links_stay_plain() {
        let context = LinkContext::document("docs", "guide/setup");

        assert_eq!(target_address("https://example.com", &context), None);
        assert_eq!(target_address("http://example.com/a.md", &context), None);
        assert_eq!(target_address("mailto:team@example.com", &context), None);
        assert_eq!(target_address("#section", &context), None);
        assert_eq!(target_address("/absolute", &context), None);
        assert_eq!(target_address("", &context), None);
    }

    #[test]
    fn test_relative_link_without_source_stays_plain() {
        let context = LinkContext::standalone();

        assert_eq!(target_address("../intro.md", &context), None);
    }

    #[test]
    fn test_already_resolved_href_not_intercepted() {
        // Document at the source root linking "intro" resolves to "intro"
        let context = LinkContext::document("docs", "index");

        assert_eq!(target_address("intro", &context), None);
        assert_eq!(
            target_address("intro.md", &context).as_deref(),
            Some("/s/docs/intro")
        );
    }

    #[test]
    fn test_rewire_binds_nested_anchors() {
        // Arrange
        let mut nodes = vec![
            Node::element(Tag::P, vec![link("../intro.md"), link("https://x.y")]),
            Node::element(
                Tag::Ul,
                vec![Node::element(Tag::Li, vec![link("#/s/other/")])],
            ),
        ];
        let context = LinkContext::document("docs", "guide/setup");

        // Act
        let bound = rewire(&mut nodes, &context);

        // Assert
        assert_eq!(bound, 2);
        let targets = bindings(&nodes);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].address, "/s/docs/intro");
        assert_eq!(targets[0].href, "../intro.md");
        assert_eq!(targets[0].text, "../intro.md");
        assert_eq!(targets[1].address, "/s/other/");
    }

    #[test]
    fn test_rewire_twice_binds_once() {
        // Arrange
        let mut nodes = vec![link("setup.md"), link("#/")];
        let context = LinkContext::document("docs", "guide/index");

        // Act
        let first = rewire(&mut nodes, &context);
        let snapshot = nodes.clone();
        let second = rewire(&mut nodes, &context);

        // Assert
        assert_eq!(first, 2);
        assert_eq!(second, 0, "Second pass must not attach handlers");
        assert_eq!(nodes, snapshot);
        for node in &nodes {
            assert!(binding_of(node).is_some(), "One handler per anchor");
        }
    }

    #[test]
    fn test_rewire_preserves_href() {
        // Arrange
        let context = LinkContext::document("docs", "guide/setup");

        // Act
        let nodes = rewired(vec![link("../intro.md")], &context);

        // Assert
        match &nodes[0] {
            Node::Element(element) => {
                assert_eq!(element.href.as_deref(), Some("../intro.md"));
                assert_eq!(binding_of(&nodes[0]), Some("/s/docs/intro"));
            }
            Node::Text(_) => panic!("Expected anchor element"),
        }
    }

    #[test]
    fn test_rewire_ignores_anchor_without_href() {
        let mut nodes = vec![Node::anchor(None, vec![Node::text("x")])];

        assert_eq!(rewire(&mut nodes, &LinkContext::document("d", "index")), 0);
        assert!(bindings(&nodes).is_empty());
    }
}
