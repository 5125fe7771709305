use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use super::{Label, LabeledTree, Node, NodeId, Tree};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ReconstructError {
    #[error("In-order sequence has {inorder} labels but pre-order sequence has {preorder}")]
    LengthMismatch { inorder: usize, preorder: usize },
    #[error("Can't rebuild a tree from empty traversals")]
    EmptyTraversal,
    #[error("Label {label} appears more than once in the in-order sequence")]
    DuplicateLabel { label: Label },
    #[error("Pre-order label {label} is not part of its in-order subtree")]
    LabelNotFound { label: Label },
    #[error("Leaf {label} has children")]
    LeafWithChildren { label: Label },
    #[error("Internal node {label} does not have two children")]
    IncompleteNode { label: Label },
}

#[derive(Clone, Copy)]
enum Side {
    Smaller,
    Bigger,
}

/// A pending subtree: the in-order range `lo..hi` and where to hang its root.
struct Frame {
    lo: usize,
    hi: usize,
    parent: Option<(usize, Side)>,
}

/// Rebuild a tree from its pre-order and in-order label sequences.
///
/// The next pre-order label is the root of the current subtree. Its position in the
/// in-order sequence splits the remaining in-order range into the `smaller` subtree
/// (left of it) and the `bigger` subtree (right of it). Subtrees are processed from an
/// explicit stack, `smaller` first, so the pre-order sequence is consumed in order and
/// deep trees don't exhaust the call stack.
pub fn reconstruct(
    preorder: &[Label],
    inorder: &[Label],
) -> Result<LabeledTree, ReconstructError> {
    use ReconstructError as err;

    if preorder.len() != inorder.len() {
        return Err(err::LengthMismatch {
            inorder: inorder.len(),
            preorder: preorder.len(),
        });
    }
    if preorder.is_empty() {
        return Err(err::EmptyTraversal);
    }

    let mut positions = BTreeMap::new();
    for (pos, label) in inorder.iter().enumerate() {
        if positions.insert(*label, pos).is_some() {
            return Err(err::DuplicateLabel { label: *label });
        }
    }

    // children slots per node, in creation (= pre-order) order
    let mut children: Vec<[Option<usize>; 2]> = Vec::with_capacity(preorder.len());
    let mut labels = preorder.iter();
    let mut stack = alloc::vec![Frame {
        lo: 0,
        hi: inorder.len(),
        parent: None,
    }];

    while let Some(Frame { lo, hi, parent }) = stack.pop() {
        if lo >= hi {
            continue;
        }
        let Some(&label) = labels.next() else {
            return Err(err::LengthMismatch {
                inorder: inorder.len(),
                preorder: preorder.len(),
            });
        };
        let pos = match positions.get(&label) {
            Some(&pos) if (lo..hi).contains(&pos) => pos,
            _ => return Err(err::LabelNotFound { label }),
        };

        let id = children.len();
        children.push([None, None]);
        if let Some((parent, side)) = parent {
            children[parent][side as usize] = Some(id);
        }

        stack.push(Frame {
            lo: pos + 1,
            hi,
            parent: Some((id, Side::Bigger)),
        });
        stack.push(Frame {
            lo,
            hi: pos,
            parent: Some((id, Side::Smaller)),
        });
    }

    let mut nodes = Vec::with_capacity(children.len());
    for (label, slots) in preorder.iter().zip(&children) {
        let node = match (*label, slots) {
            (Label::Symbol(symbol), [None, None]) => Node::Leaf { symbol },
            (Label::Symbol(_), _) => return Err(err::LeafWithChildren { label: *label }),
            (Label::Internal(_), [Some(smaller), Some(bigger)]) => Node::Internal {
                smaller: NodeId(*smaller),
                bigger: NodeId(*bigger),
            },
            (Label::Internal(_), _) => return Err(err::IncompleteNode { label: *label }),
        };
        nodes.push(node);
    }

    tracing::debug!("reconstructed code tree with {} nodes", nodes.len());
    let tree = Tree::from_arena(nodes, NodeId(0));
    Ok(LabeledTree::from_labels(tree, preorder.to_vec()))
}
