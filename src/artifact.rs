//! The on-disk layout of a compressed text.
//!
//! ```text
//! <escaped bitstream><valid bit count, one digit 0-7>
//! Inorder={l1,l2,...,lN,}
//! Preorder={l1,l2,...,lN,}
//! ```
//!
//! The whole artifact is UTF-8 text. The bitstream never contains a newline, since
//! newline is a reserved code word and always escaped, so the first line ends at the
//! first newline byte. Lines may also end in `\r\n`.
//!
//! Each label in the lists is followed by a comma. An internal node label is a run of
//! decimal digits. A leaf label is the symbol itself, UTF-8 encoded; symbols that
//! would be mistaken for something else (ASCII digits, the backslash and the closing
//! brace) are written with a backslash in front of them.

use alloc::vec::Vec;
use core::fmt::Write as _;

use crate::common::{
    CARRIAGE_RETURN, ESCAPE_BYTE, INORDER_TAG, LINE_END, LIST_CLOSE, LIST_OPEN, LIST_SEPARATOR,
    PREORDER_TAG,
};
use crate::errors::ErrorKind;
use crate::tree::Label;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ArtifactError {
    #[error("The bitstream line is not terminated by a newline")]
    MissingBitstreamLine,
    #[error("The bitstream line is empty, expected at least the valid bit count")]
    MissingValidBits,
    #[error("Invalid valid bit count. Is: 0x{got:02X}, Should be an ASCII digit from 0 to 7")]
    InvalidValidBits { got: u8 },
    #[error("Missing section, expected {tag:?} at offset {offset}")]
    MissingSection { tag: &'static str, offset: usize },
    #[error("Label list of section {tag:?} ends before its closing brace")]
    MissingTerminator { tag: &'static str },
    #[error("Unexpected byte 0x{got:02X} at offset {offset} in section {tag:?}")]
    UnexpectedByte {
        tag: &'static str,
        offset: usize,
        got: u8,
    },
    #[error("Leaf label at offset {offset} in section {tag:?} is not valid UTF-8")]
    InvalidUtf8 { tag: &'static str, offset: usize },
    #[error("Internal node label at offset {offset} does not fit into 32 bits")]
    LabelOverflow { offset: usize },
}

impl ArtifactError {
    /// Damage to the bitstream line makes the artifact corrupt, damage to the label
    /// lists makes the tree malformed.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArtifactError::MissingBitstreamLine
            | ArtifactError::MissingValidBits
            | ArtifactError::InvalidValidBits { .. }
            | ArtifactError::MissingSection { .. } => ErrorKind::CorruptArtifact,
            ArtifactError::MissingTerminator { .. }
            | ArtifactError::UnexpectedByte { .. }
            | ArtifactError::InvalidUtf8 { .. }
            | ArtifactError::LabelOverflow { .. } => ErrorKind::MalformedTree,
        }
    }
}

/// Everything needed to restore the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedArtifact {
    /// The packed code words, escaped and UTF-8 encoded
    pub bitstream: Vec<u8>,
    /// Number of meaningful bits in the last code word of `bitstream`, 0..=7
    pub valid_bits: u8,
    pub inorder: Vec<Label>,
    pub preorder: Vec<Label>,
}

impl CompressedArtifact {
    /// Append the text form of the artifact to `output`.
    pub fn serialize(&self, output: &mut Vec<u8>) {
        debug_assert!(self.valid_bits < 8);
        output.extend_from_slice(&self.bitstream);
        output.push(b'0' + self.valid_bits);
        output.push(LINE_END);
        write_labels(output, INORDER_TAG, &self.inorder);
        output.push(LINE_END);
        write_labels(output, PREORDER_TAG, &self.preorder);
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut output = Vec::new();
        self.serialize(&mut output);
        output
    }

    /// Length of the first line, bitstream plus valid bit count.
    pub fn bitstream_line_len(&self) -> usize {
        self.bitstream.len() + 1
    }
}

fn write_labels(output: &mut Vec<u8>, tag: &str, labels: &[Label]) {
    output.extend_from_slice(tag.as_bytes());
    output.push(LIST_OPEN);
    let mut utf8 = [0u8; 4];
    for label in labels {
        match *label {
            Label::Internal(number) => {
                let mut digits = alloc::string::String::new();
                // writing into a String can't fail
                let _ = write!(digits, "{number}");
                output.extend_from_slice(digits.as_bytes());
            }
            Label::Symbol(symbol) => {
                if needs_escape(symbol) {
                    output.push(ESCAPE_BYTE);
                }
                output.extend_from_slice(symbol.encode_utf8(&mut utf8).as_bytes());
            }
        }
        output.push(LIST_SEPARATOR);
    }
    output.push(LIST_CLOSE);
}

fn needs_escape(symbol: char) -> bool {
    symbol.is_ascii_digit() || symbol == char::from(ESCAPE_BYTE) || symbol == char::from(LIST_CLOSE)
}

/// Parse the text form of an artifact.
pub fn read_artifact(source: &[u8]) -> Result<CompressedArtifact, ArtifactError> {
    use ArtifactError as err;

    let line_len = source
        .iter()
        .position(|&b| b == LINE_END)
        .ok_or(err::MissingBitstreamLine)?;
    // a `\r` is never part of the bitstream, reserved code words are escaped
    let line = &source[..line_len];
    let line = line.strip_suffix(&[CARRIAGE_RETURN]).unwrap_or(line);
    let (&count, bitstream) = line.split_last().ok_or(err::MissingValidBits)?;
    let valid_bits = match count {
        b'0'..=b'7' => count - b'0',
        got => return Err(err::InvalidValidBits { got }),
    };

    let mut reader = LabelReader {
        source,
        idx: line_len + 1,
    };
    let inorder = reader.read_section(INORDER_TAG)?;
    reader.expect_line_end(INORDER_TAG)?;
    let preorder = reader.read_section(PREORDER_TAG)?;
    reader.skip_trailing_whitespace(PREORDER_TAG)?;

    tracing::debug!(
        "read artifact: {} bitstream bytes, {} valid bits, {} labels",
        bitstream.len(),
        valid_bits,
        inorder.len()
    );
    Ok(CompressedArtifact {
        bitstream: bitstream.to_vec(),
        valid_bits,
        inorder,
        preorder,
    })
}

struct LabelReader<'s> {
    source: &'s [u8],
    idx: usize,
}

impl LabelReader<'_> {
    fn peek(&self) -> Option<u8> {
        self.source.get(self.idx).copied()
    }

    fn expect(&mut self, byte: u8, tag: &'static str) -> Result<(), ArtifactError> {
        match self.peek() {
            Some(b) if b == byte => {
                self.idx += 1;
                Ok(())
            }
            Some(got) => Err(ArtifactError::UnexpectedByte {
                tag,
                offset: self.idx,
                got,
            }),
            None => Err(ArtifactError::MissingTerminator { tag }),
        }
    }

    /// `\n` or `\r\n`
    fn expect_line_end(&mut self, tag: &'static str) -> Result<(), ArtifactError> {
        if self.peek() == Some(CARRIAGE_RETURN) {
            self.idx += 1;
        }
        self.expect(LINE_END, tag)
    }

    fn read_section(&mut self, tag: &'static str) -> Result<Vec<Label>, ArtifactError> {
        if !self.source[self.idx.min(self.source.len())..].starts_with(tag.as_bytes()) {
            return Err(ArtifactError::MissingSection {
                tag,
                offset: self.idx,
            });
        }
        self.idx += tag.len();
        self.expect(LIST_OPEN, tag)?;

        let mut labels = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ArtifactError::MissingTerminator { tag }),
                Some(LIST_CLOSE) => {
                    self.idx += 1;
                    return Ok(labels);
                }
                Some(_) => {
                    labels.push(self.read_label(tag)?);
                    self.expect(LIST_SEPARATOR, tag)?;
                }
            }
        }
    }

    fn read_label(&mut self, tag: &'static str) -> Result<Label, ArtifactError> {
        let start = self.idx;
        match self.peek() {
            Some(ESCAPE_BYTE) => {
                self.idx += 1;
                Ok(Label::Symbol(self.read_char(tag)?))
            }
            Some(b) if b.is_ascii_digit() => {
                let mut number: u32 = 0;
                while let Some(digit) = self.peek().filter(u8::is_ascii_digit) {
                    number = number
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(u32::from(digit - b'0')))
                        .ok_or(ArtifactError::LabelOverflow { offset: start })?;
                    self.idx += 1;
                }
                Ok(Label::Internal(number))
            }
            _ => Ok(Label::Symbol(self.read_char(tag)?)),
        }
    }

    /// Decode exactly one UTF-8 encoded char.
    fn read_char(&mut self, tag: &'static str) -> Result<char, ArtifactError> {
        let rest = &self.source[self.idx.min(self.source.len())..];
        if rest.is_empty() {
            return Err(ArtifactError::MissingTerminator { tag });
        }
        let chunk = &rest[..rest.len().min(4)];
        let valid = match core::str::from_utf8(chunk) {
            Ok(s) => s,
            // the chunk may cut the following char in half, that's fine
            Err(e) => core::str::from_utf8(&chunk[..e.valid_up_to()]).unwrap_or_default(),
        };
        let symbol = valid.chars().next().ok_or(ArtifactError::InvalidUtf8 {
            tag,
            offset: self.idx,
        })?;
        self.idx += symbol.len_utf8();
        Ok(symbol)
    }

    fn skip_trailing_whitespace(&mut self, tag: &'static str) -> Result<(), ArtifactError> {
        while let Some(b) = self.peek() {
            if !b.is_ascii_whitespace() {
                return Err(ArtifactError::UnexpectedByte {
                    tag,
                    offset: self.idx,
                    got: b,
                });
            }
            self.idx += 1;
        }
        Ok(())
    }
}
