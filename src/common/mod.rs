//! Values and interfaces shared between the encoding side
//! and the decoding side.

pub mod escape;

// --- BITSTREAM ---
/// Prefixes a reserved code word in the packed bitstream.
pub const ESCAPE_BYTE: u8 = b'\\';
/// Terminates the bitstream line. Always a reserved pattern, so it never shows up unescaped.
pub const LINE_END: u8 = b'\n';
/// Tolerated in front of [`LINE_END`]
pub const CARRIAGE_RETURN: u8 = b'\r';
/// Number of bits grouped into one code word.
pub const CODE_WORD_BITS: usize = 8;

// --- TREE SECTIONS ---
/// Tag in front of the in-order label list.
pub const INORDER_TAG: &str = "Inorder=";
/// Tag in front of the pre-order label list.
pub const PREORDER_TAG: &str = "Preorder=";
pub const LIST_OPEN: u8 = b'{';
pub const LIST_CLOSE: u8 = b'}';
pub const LIST_SEPARATOR: u8 = b',';

/// The lengths reported after a file has been compressed or decompressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Number of symbols in the plain text
    pub text_len: usize,
    /// Size of the whole artifact in bytes
    pub artifact_len: usize,
    /// Size of the escaped bitstream line in bytes, valid bit count included
    pub bitstream_line_len: usize,
}
