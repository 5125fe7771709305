use alloc::string::String;

use super::BitReader;
use crate::common::escape::UnescapeError;
use crate::tree::{LabeledTree, Node, Path};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error(transparent)]
    Unescape(#[from] UnescapeError),
    #[error("The bitstream is empty, expected at least the padded last code word")]
    EmptyBitstream,
    #[error("The bitstream ends inside a code, the walk stopped at path {path}")]
    WalkEndedMidTree { path: Path },
    #[error("Bit {offset} is a 1 but the only code is 0")]
    StrayBit { offset: usize },
}

/// Walk the code tree along `bits`, pushing a symbol to `output` every time a leaf is
/// reached, then restarting at the root. Returns how many symbols were decoded.
///
/// A tree made of a single leaf has the code `0`, every `0` bit decodes to its symbol.
pub fn decode_symbols(
    tree: &LabeledTree,
    bits: BitReader<'_>,
    output: &mut String,
) -> Result<usize, DecodeError> {
    let arena = tree.tree();
    let root = arena.root();

    let (root_smaller, root_bigger) = match *arena.node(root) {
        Node::Internal { smaller, bigger } => (smaller, bigger),
        Node::Leaf { symbol } => {
            let mut decoded = 0;
            for (offset, bit) in bits.enumerate() {
                if bit {
                    return Err(DecodeError::StrayBit { offset });
                }
                output.push(symbol);
                decoded += 1;
            }
            return Ok(decoded);
        }
    };

    let mut decoded = 0;
    let mut current = root;
    let (mut smaller, mut bigger) = (root_smaller, root_bigger);
    for bit in bits {
        let next = if bit { bigger } else { smaller };
        match *arena.node(next) {
            Node::Leaf { symbol } => {
                output.push(symbol);
                decoded += 1;
                current = root;
                (smaller, bigger) = (root_smaller, root_bigger);
            }
            Node::Internal {
                smaller: next_smaller,
                bigger: next_bigger,
            } => {
                current = next;
                (smaller, bigger) = (next_smaller, next_bigger);
            }
        }
    }

    if current != root {
        return Err(DecodeError::WalkEndedMidTree {
            path: tree.path(current).clone(),
        });
    }
    tracing::debug!("decoded {} symbols", decoded);
    Ok(decoded)
}
