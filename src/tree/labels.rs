use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use super::{CodeTable, Label, Node, NodeId, Path, Tree};

/// Hands out internal node labels. One counter lives for exactly one labeling pass,
/// so concurrent compressions never share label state.
#[derive(Debug, Default)]
pub struct LabelCounter {
    next: u32,
}

impl LabelCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_label(&mut self) -> Label {
        let label = Label::Internal(self.next);
        self.next += 1;
        label
    }
}

/// Per node data computed after the shape of the tree is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInfo {
    pub label: Label,
    pub depth: usize,
    pub path: Path,
}

/// A tree together with every node's label, depth and path.
///
/// The in-order and pre-order label sequences of a labeled tree are its serialized
/// form: as long as all labels are distinct, the two sequences determine the shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledTree {
    tree: Tree,
    /// indexed by `NodeId`
    info: Vec<NodeInfo>,
}

impl LabeledTree {
    /// Label a freshly built tree. Internal nodes are numbered in pre-order starting at 0,
    /// visiting the `smaller` subtree before the `bigger` one. Leaves are labeled with
    /// their symbol and don't consume a number.
    pub fn assign(tree: Tree) -> Self {
        let mut counter = LabelCounter::new();
        let mut labels = alloc::vec![Label::Internal(0); tree.len()];
        for id in tree.preorder() {
            labels[id.0] = match *tree.node(id) {
                Node::Leaf { symbol } => Label::Symbol(symbol),
                Node::Internal { .. } => counter.next_label(),
            };
        }
        tracing::debug!(
            "labeled {} nodes, {} internal",
            tree.len(),
            counter.next
        );
        Self::from_labels(tree, labels)
    }

    /// Attach already known labels (indexed by `NodeId`) and compute depths and paths.
    pub(super) fn from_labels(tree: Tree, labels: Vec<Label>) -> Self {
        debug_assert_eq!(tree.len(), labels.len());
        let mut info: Vec<Option<NodeInfo>> = alloc::vec![None; tree.len()];

        let root_path = if tree.is_single_leaf() {
            Path::single_leaf()
        } else {
            Path::new()
        };
        let mut stack = alloc::vec![(tree.root(), 0, root_path)];
        while let Some((id, depth, path)) = stack.pop() {
            if let Node::Internal { smaller, bigger } = *tree.node(id) {
                stack.push((bigger, depth + 1, path.child(true)));
                stack.push((smaller, depth + 1, path.child(false)));
            }
            info[id.0] = Some(NodeInfo {
                label: labels[id.0],
                depth,
                path,
            });
        }

        let info = info
            .into_iter()
            .zip(labels)
            .map(|(info, label)| {
                // nodes not reachable from the root can't exist in a built or reconstructed tree
                info.unwrap_or(NodeInfo {
                    label,
                    depth: 0,
                    path: Path::new(),
                })
            })
            .collect();
        LabeledTree { tree, info }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn info(&self, id: NodeId) -> &NodeInfo {
        &self.info[id.0]
    }

    pub fn label(&self, id: NodeId) -> Label {
        self.info[id.0].label
    }

    pub fn path(&self, id: NodeId) -> &Path {
        &self.info[id.0].path
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.info[id.0].depth
    }

    /// Labels in-order: smaller subtree, self, bigger subtree.
    pub fn inorder_labels(&self) -> Vec<Label> {
        self.tree
            .inorder()
            .into_iter()
            .map(|id| self.label(id))
            .collect()
    }

    /// Labels in pre-order: self, smaller subtree, bigger subtree.
    pub fn preorder_labels(&self) -> Vec<Label> {
        self.tree
            .preorder()
            .into_iter()
            .map(|id| self.label(id))
            .collect()
    }

    /// The symbol -> code mapping defined by the leaves.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        for id in self.tree.preorder() {
            if let Node::Leaf { symbol } = *self.tree.node(id) {
                table.insert(symbol, self.path(id).clone());
            }
        }
        table
    }

    /// Dump the tree in pre-order, one node per line, indented by depth.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for id in self.tree.preorder() {
            let info = self.info(id);
            for _ in 0..info.depth {
                out.push('-');
            }
            // writing into a String can't fail
            let _ = writeln!(
                out,
                "label: '{}', depth: {}, path: '{}'",
                info.label, info.depth, info.path
            );
        }
        out
    }
}
