use alloc::collections::{BTreeSet, BinaryHeap};
use alloc::vec::Vec;
use core::cmp::Reverse;

use super::{Node, NodeId, Tree};
use crate::frequency::FrequencyEntry;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TreeBuildError {
    #[error("Can't build a code tree without any symbols")]
    EmptyHistogram,
    #[error("Symbol {symbol:?} has a count of zero")]
    NonPositiveWeight { symbol: char },
    #[error("Symbol {symbol:?} appears more than once in the histogram")]
    DuplicateSymbol { symbol: char },
    #[error("Sum of symbol counts overflows")]
    WeightOverflow,
}

/// Build the code tree with the classic Huffman merge.
///
/// The two lightest nodes are popped from a min-priority queue and merged; the first
/// popped becomes `smaller`. Equal weights are popped in insertion order: leaves in
/// the order `entries` yields them, merged nodes after everything that was queued
/// before them. A single distinct symbol yields a tree that is just that leaf.
pub fn build_tree(
    entries: impl IntoIterator<Item = FrequencyEntry>,
) -> Result<Tree, TreeBuildError> {
    use TreeBuildError as err;

    let mut nodes = Vec::new();
    let mut seen = BTreeSet::new();
    // (weight, insertion sequence, node), wrapped in Reverse to pop the smallest first
    let mut queue = BinaryHeap::new();

    for entry in entries {
        if entry.count == 0 {
            return Err(err::NonPositiveWeight {
                symbol: entry.symbol,
            });
        }
        if !seen.insert(entry.symbol) {
            return Err(err::DuplicateSymbol {
                symbol: entry.symbol,
            });
        }
        let id = NodeId(nodes.len());
        nodes.push(Node::Leaf {
            symbol: entry.symbol,
        });
        queue.push(Reverse((entry.count, id.0, id)));
    }

    if queue.is_empty() {
        return Err(err::EmptyHistogram);
    }
    let leaves = nodes.len();
    tracing::debug!("building code tree over {} distinct symbols", leaves);

    let mut sequence = leaves;
    loop {
        let Some(Reverse((smaller_weight, _, smaller))) = queue.pop() else {
            return Err(err::EmptyHistogram);
        };
        let Some(Reverse((bigger_weight, _, bigger))) = queue.pop() else {
            // only one node left, that's the root
            return Ok(Tree::from_arena(nodes, smaller));
        };

        let weight = smaller_weight
            .checked_add(bigger_weight)
            .ok_or(err::WeightOverflow)?;
        let id = NodeId(nodes.len());
        nodes.push(Node::Internal { smaller, bigger });
        tracing::trace!(
            "merged {:?} ({}) and {:?} ({}) into {:?} ({})",
            smaller,
            smaller_weight,
            bigger,
            bigger_weight,
            id,
            weight
        );
        queue.push(Reverse((weight, sequence, id)));
        sequence += 1;
    }
}
