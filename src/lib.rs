//! A character-frequency Huffman codec for text.
//!
//! The compressed artifact is self-describing: the escaped bitstream is followed by
//! the number of valid bits in its last byte, and the code tree is stored as its
//! in-order and pre-order label sequences.
//!
//! ```
//! let packed = ruhuff::compress_to_vec("aaabbc").unwrap();
//! assert_eq!(ruhuff::decompress(&packed).unwrap(), "aaabbc");
//! ```
#![no_std]
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod artifact;
pub mod common;
pub mod decoding;
pub mod encoding;
pub mod errors;
pub mod frequency;
pub mod tree;
#[cfg(test)]
mod tests;

pub use artifact::CompressedArtifact;
pub use common::Report;
pub use decoding::{decompress, decompress_artifact};
pub use encoding::{compress, compress_to_vec};
pub use errors::{Error, ErrorKind};
pub use frequency::FrequencyTable;

#[cfg(feature = "std")]
pub use decoding::decompress_stream;
#[cfg(feature = "std")]
pub use encoding::compress_stream;
