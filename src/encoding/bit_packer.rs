use alloc::vec::Vec;

use crate::common::escape::escape;
use crate::common::CODE_WORD_BITS;
use crate::tree::CodeTable;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PackError {
    #[error("Symbol {symbol:?} has no code in the code table")]
    UnknownSymbol { symbol: char },
}

/// The escaped bitstream and the number of valid bits in its last code word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    /// 0..=7, the last code word is always a padded partial one
    pub valid_bits: u8,
    /// How many code words were written, the padded last one included
    pub code_words: usize,
    /// How many of those needed an escape sequence
    pub escapes: usize,
}

/// An interface for turning a symbol stream into escaped code words.
///
/// Codes are appended to a bit buffer, most significant bit first. Every time the
/// buffer holds a full code word it is escaped and moved to the output.
pub struct BitPacker<'t> {
    codes: &'t CodeTable,
    output: Vec<u8>,
    /// The bits of the current code word, filled from the least significant end
    buffer: u8,
    /// Number of bits in `buffer`, always below 8 between calls
    bit_idx: usize,
    code_words: usize,
    escapes: usize,
}

impl<'t> BitPacker<'t> {
    pub fn new(codes: &'t CodeTable) -> Self {
        Self {
            codes,
            output: Vec::new(),
            buffer: 0,
            bit_idx: 0,
            code_words: 0,
            escapes: 0,
        }
    }

    /// Same as [`BitPacker::new`] but reserves room for roughly `expected_bytes` of output.
    pub fn with_capacity(codes: &'t CodeTable, expected_bytes: usize) -> Self {
        let mut packer = Self::new(codes);
        packer.output.reserve(expected_bytes);
        packer
    }

    pub fn push_symbol(&mut self, symbol: char) -> Result<(), PackError> {
        let path = self
            .codes
            .get(symbol)
            .ok_or(PackError::UnknownSymbol { symbol })?;
        for &bit in path.bits() {
            self.push_bit(bit);
        }
        Ok(())
    }

    pub fn push_text(&mut self, text: &str) -> Result<(), PackError> {
        for symbol in text.chars() {
            self.push_symbol(symbol)?;
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        self.buffer = (self.buffer << 1) | u8::from(bit);
        self.bit_idx += 1;
        if self.bit_idx == CODE_WORD_BITS {
            self.emit(self.buffer);
            self.buffer = 0;
            self.bit_idx = 0;
        }
    }

    fn emit(&mut self, code_word: u8) {
        let escaped = escape(code_word);
        if escaped.is_escape() {
            self.escapes += 1;
        }
        escaped.write_to(&mut self.output);
        self.code_words += 1;
    }

    /// Pad the leftover bits with zeros to a full code word and write it, even if there
    /// are no leftover bits at all. The reader relies on the last code word being the
    /// partial one.
    ///
    /// This function consumes the packer, so it cannot be used after finishing
    pub fn finish(mut self) -> PackedBits {
        let valid_bits = self.bit_idx;
        // shifting a u8 by 8 overflows, an empty buffer pads to zero
        let padded = self
            .buffer
            .checked_shl((CODE_WORD_BITS - valid_bits) as u32)
            .unwrap_or(0);
        self.emit(padded);
        tracing::debug!(
            "packed {} code words into {} bytes, {} escaped, {} valid bits in the last word",
            self.code_words,
            self.output.len(),
            self.escapes,
            valid_bits
        );
        PackedBits {
            bytes: self.output,
            // bit_idx never reaches CODE_WORD_BITS between calls
            valid_bits: valid_bits as u8,
            code_words: self.code_words,
            escapes: self.escapes,
        }
    }
}
