//! Turning plain text into a [`CompressedArtifact`].
//!
//! The pipeline is: count symbol frequencies, build the code tree, label it, derive the
//! code table, pack the symbols' codes into escaped code words and attach both
//! traversals of the tree.
mod bit_packer;
pub use bit_packer::*;

use alloc::vec::Vec;

use crate::artifact::CompressedArtifact;
use crate::errors::Error;
use crate::frequency::FrequencyTable;
use crate::tree::{build_tree, LabeledTree};

/// Compress `text` into an artifact.
///
/// Fails with [`crate::ErrorKind::InvalidInput`] if `text` is empty, there is no code
/// tree for zero symbols.
pub fn compress(text: &str) -> Result<CompressedArtifact, Error> {
    let frequencies = FrequencyTable::from_text(text);
    tracing::debug!(
        "counted {} distinct symbols in {} total",
        frequencies.len(),
        frequencies.total()
    );

    let tree = LabeledTree::assign(build_tree(frequencies.iter())?);
    tracing::trace!("code tree:\n{}", tree.render());
    let codes = tree.code_table();

    let mut packer = BitPacker::with_capacity(&codes, text.len() / 2);
    packer.push_text(text)?;
    let packed = packer.finish();

    Ok(CompressedArtifact {
        bitstream: packed.bytes,
        valid_bits: packed.valid_bits,
        inorder: tree.inorder_labels(),
        preorder: tree.preorder_labels(),
    })
}

/// Compress `text` and serialize the artifact.
pub fn compress_to_vec(text: &str) -> Result<Vec<u8>, Error> {
    Ok(compress(text)?.to_vec())
}

/// Read all of `source` as UTF-8 text, compress it and write the artifact to `drain`.
#[cfg(feature = "std")]
pub fn compress_stream<R: std::io::Read, W: std::io::Write>(
    mut source: R,
    mut drain: W,
) -> Result<crate::common::Report, Error> {
    let mut text = std::string::String::new();
    source.read_to_string(&mut text)?;

    let artifact = compress(&text)?;
    let serialized = artifact.to_vec();
    drain.write_all(&serialized)?;
    drain.flush()?;

    Ok(crate::common::Report {
        text_len: text.chars().count(),
        artifact_len: serialized.len(),
        bitstream_line_len: artifact.bitstream_line_len(),
    })
}
