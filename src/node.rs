//! Trie nodes.
//!
//! Nodes live in the `Trie`'s arena and refer to each other by `NodeId`.
//! Children are owned through the arena; the parent link is a plain index
//! used only when pruning after a removal.

/// Frequency score attached to a node
pub type Weight = u64;

/// Index of a node inside a `Trie`'s arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node always occupies the first slot
    pub const ROOT: NodeId = NodeId(0);

    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node in the Trie
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// Character this node adds to its parent's prefix (`None` for the root)
    pub(crate) symbol: Option<char>,
    /// Every symbol from the root down to this node
    pub(crate) prefix: String,
    /// Whether `prefix` is a stored word
    pub(crate) is_terminal: bool,
    pub(crate) parent: Option<NodeId>,
    /// Child nodes in insertion order, distinct symbols
    pub(crate) children: Vec<NodeId>,
    pub(crate) weight: Weight,
}

impl TrieNode {
    /// Create the root node
    pub fn root() -> Self {
        TrieNode::default()
    }

    /// Create a child of `parent`, whose prefix is `parent_prefix` + `symbol`
    pub fn child_of(parent: NodeId, parent_prefix: &str, symbol: char, weight: Weight) -> Self {
        let mut prefix = String::with_capacity(parent_prefix.len() + symbol.len_utf8());
        prefix.push_str(parent_prefix);
        prefix.push(symbol);

        TrieNode {
            symbol: Some(symbol),
            prefix,
            is_terminal: false,
            parent: Some(parent),
            children: Vec::new(),
            weight,
        }
    }

    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Check if this node has any children
    pub fn can_walk(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if this node is a valid word ending
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Whether this is the root. A vacant arena slot has no symbol or
    /// parent either and also reads as a root; `Trie::node` skips those.
    pub fn is_root(&self) -> bool {
        self.parent.is_none() && self.symbol.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_node() {
        let root = TrieNode::root();
        assert!(root.is_root());
        assert_eq!(root.prefix(), "");
        assert_eq!(root.symbol(), None);
        assert!(!root.is_terminal());
        assert!(!root.can_walk());
    }

    #[test]
    fn test_child_prefix_extends_parent() {
        let node = TrieNode::child_of(NodeId(3), "ca", 't', 16);
        assert_eq!(node.prefix(), "cat");
        assert_eq!(node.symbol(), Some('t'));
        assert_eq!(node.parent(), Some(NodeId(3)));
        assert_eq!(node.weight(), 16);
        assert!(!node.is_root());
    }
}
