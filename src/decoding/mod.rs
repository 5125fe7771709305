//! Turning a serialized artifact back into the original text.

mod bit_reader;
mod decoder;
pub use bit_reader::BitReader;
pub use decoder::*;

use alloc::string::String;

use crate::artifact::{read_artifact, CompressedArtifact};
use crate::common::escape::unescape_all;
use crate::errors::Error;
use crate::tree::reconstruct;

/// Parse and decode a serialized artifact.
pub fn decompress(source: &[u8]) -> Result<String, Error> {
    let artifact = read_artifact(source)?;
    decompress_artifact(&artifact)
}

/// Rebuild the code tree from the traversals and walk it along the unescaped bitstream.
pub fn decompress_artifact(artifact: &CompressedArtifact) -> Result<String, Error> {
    let tree = reconstruct(&artifact.preorder, &artifact.inorder)?;
    let words = unescape_all(&artifact.bitstream).map_err(DecodeError::from)?;
    let bits = BitReader::new(&words, artifact.valid_bits).ok_or(DecodeError::EmptyBitstream)?;
    tracing::debug!(
        "decoding {} code words, {} bits",
        words.len(),
        bits.bits_left()
    );

    let mut output = String::with_capacity(bits.bits_left() / 2);
    decode_symbols(&tree, bits, &mut output)?;
    Ok(output)
}

/// Read a whole artifact from `source`, decode it and write the text to `drain`.
#[cfg(feature = "std")]
pub fn decompress_stream<R: std::io::Read, W: std::io::Write>(
    mut source: R,
    mut drain: W,
) -> Result<crate::common::Report, Error> {
    let mut serialized = alloc::vec::Vec::new();
    source.read_to_end(&mut serialized)?;

    let artifact = read_artifact(&serialized)?;
    let text = decompress_artifact(&artifact)?;
    drain.write_all(text.as_bytes())?;
    drain.flush()?;

    Ok(crate::common::Report {
        text_len: text.chars().count(),
        artifact_len: serialized.len(),
        bitstream_line_len: artifact.bitstream_line_len(),
    })
}
