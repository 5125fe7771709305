//! The binary prefix-code tree.
//!
//! Nodes live in a flat arena and refer to their children by [`NodeId`], so no
//! operation on a tree (including dropping it) recurses. Leaves carry a symbol,
//! internal nodes carry exactly two children: `smaller` (bit `0`) and `bigger` (bit `1`).
//!
//! A tree is produced either by [`build_tree`] from a histogram, or by
//! [`reconstruct`] from its serialized traversals. Both are turned into a
//! [`LabeledTree`], which knows every node's label, depth and path.

use alloc::vec::Vec;
use core::fmt;

mod builder;
mod code_table;
mod labels;
mod reconstruct;

pub use builder::*;
pub use code_table::*;
pub use labels::*;
pub use reconstruct::*;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf { symbol: char },
    Internal { smaller: NodeId, bigger: NodeId },
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Identifies a node in the serialized traversals.
///
/// Leaves are labeled with their symbol, internal nodes with a number handed out
/// in pre-order, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Symbol(char),
    Internal(u32),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Symbol(symbol) => write!(f, "{}", symbol.escape_debug()),
            Label::Internal(number) => write!(f, "{number}"),
        }
    }
}

/// The bits leading from the root to a node, `false` for `smaller` and `true` for `bigger`.
/// A leaf's path is its code.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    bits: Vec<bool>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// The path of a tree that consists of a single leaf. It has to emit at least one bit
    /// per symbol, so it is `0` rather than empty.
    pub fn single_leaf() -> Self {
        Path { bits: alloc::vec![false] }
    }

    pub fn child(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Path { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// A strict binary tree stored in an arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Caller guarantees that `root` and every child id index into `nodes`.
    fn from_arena(nodes: Vec<Node>, root: NodeId) -> Self {
        debug_assert!(root.0 < nodes.len());
        Tree { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total number of nodes, leaves and internal nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// True if the whole tree is one leaf, which happens for single-symbol inputs.
    pub fn is_single_leaf(&self) -> bool {
        self.node(self.root).is_leaf()
    }

    /// Node ids in pre-order: self, smaller subtree, bigger subtree.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = alloc::vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Node::Internal { smaller, bigger } = *self.node(id) {
                stack.push(bigger);
                stack.push(smaller);
            }
        }
        order
    }

    /// Node ids in-order: smaller subtree, self, bigger subtree.
    pub fn inorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = Some(self.root);
        loop {
            while let Some(id) = current {
                stack.push(id);
                current = match *self.node(id) {
                    Node::Internal { smaller, .. } => Some(smaller),
                    Node::Leaf { .. } => None,
                };
            }
            let Some(id) = stack.pop() else {
                break;
            };
            order.push(id);
            current = match *self.node(id) {
                Node::Internal { bigger, .. } => Some(bigger),
                Node::Leaf { .. } => None,
            };
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    /// (a, (b, c)) laid out by hand
    fn small_tree() -> Tree {
        let nodes = vec![
            Node::Leaf { symbol: 'a' },
            Node::Leaf { symbol: 'b' },
            Node::Leaf { symbol: 'c' },
            Node::Internal {
                smaller: NodeId(1),
                bigger: NodeId(2),
            },
            Node::Internal {
                smaller: NodeId(0),
                bigger: NodeId(3),
            },
        ];
        Tree::from_arena(nodes, NodeId(4))
    }

    #[test]
    fn traversal_orders() {
        let tree = small_tree();
        let ids = |order: Vec<NodeId>| order.into_iter().map(NodeId::index).collect::<Vec<_>>();
        assert_eq!(ids(tree.preorder()), [4, 0, 3, 1, 2]);
        assert_eq!(ids(tree.inorder()), [0, 4, 1, 3, 2]);
        assert_eq!(tree.leaf_count(), 3);
        assert!(!tree.is_single_leaf());
    }

    #[test]
    fn single_leaf_traversals() {
        let tree = Tree::from_arena(vec![Node::Leaf { symbol: 'x' }], NodeId(0));
        assert!(tree.is_single_leaf());
        assert_eq!(tree.preorder(), [NodeId(0)]);
        assert_eq!(tree.inorder(), [NodeId(0)]);
    }

    #[test]
    fn path_display() {
        let path = Path::new().child(true).child(false).child(true);
        assert_eq!(path.to_string(), "101");
        assert_eq!(Path::single_leaf().to_string(), "0");
        assert!(Path::new().is_empty());
    }

    #[test]
    fn label_display() {
        assert_eq!(Label::Internal(12).to_string(), "12");
        assert_eq!(Label::Symbol('a').to_string(), "a");
        assert_eq!(Label::Symbol('\n').to_string(), "\\n");
    }
}
