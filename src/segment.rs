//! Grouping of rendered documents into heading-anchored blocks.

use crate::dom::Node;

/// Contiguous run of top-level nodes starting at a heading.
///
/// Content before the first heading forms a block without heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    level: Option<u8>,
    nodes: Vec<Node>,
}

impl Block {
    fn open(level: Option<u8>) -> Self {
        Self {
            level,
            nodes: Vec::new(),
        }
    }

    /// Level of the opening heading, `None` for leading content.
    pub fn level(&self) -> Option<u8> {
        self.level
    }

    /// Level used for styling; headingless blocks group as level 1.
    pub fn display_level(&self) -> u8 {
        self.level.unwrap_or(1)
    }

    /// Nodes of the block, heading first when present.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable nodes, used to attach link bindings.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Consumes block, returning its nodes.
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    /// Plain text of the opening heading.
    pub fn heading_text(&self) -> Option<String> {
        self.level?;
        self.nodes.first().map(Node::text_content)
    }

    /// CSS class list of the block container.
    pub fn class_name(&self) -> String {
        format!("doc-block doc-block-{}", self.display_level())
    }
}

/// Partitions top-level nodes into blocks.
///
/// Every heading starts a new block; other nodes join the open block, or an
/// implicit headingless block when none is open yet. Order is preserved and
/// every node lands in exactly one block.
///
/// # Arguments
///
/// * `nodes`: Top-level nodes of a rendered document
///
/// # Returns
///
/// Blocks in document order, empty for empty input
pub fn segment(nodes: impl IntoIterator<Item = Node>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for node in nodes {
        let block = match node.heading_level() {
            Some(level) => {
                blocks.extend(current.take());
                current.insert(Block::open(Some(level)))
            }
            None => current.get_or_insert_with(|| Block::open(None)),
        };
        block.nodes.push(node);
    }

    blocks.extend(current);
    blocks
}
