//! Maps 8 bit code words onto characters that are safe to keep in a text file.
//!
//! A code word is written as the character with the same value, U+0000 to U+00FF,
//! UTF-8 encoded. ASCII control characters (`0x00..=0x1F`, `0x7F`) and the backslash
//! are reserved: such a code word is written as a backslash followed by the code word
//! with its most significant bit set. All reserved patterns have that bit cleared, so
//! the mapping can be reversed by clearing it again.

use alloc::vec::Vec;

use super::ESCAPE_BYTE;

/// The high bit used to move a reserved pattern out of the reserved range.
const FLIP_BIT: u8 = 0b1000_0000;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum UnescapeError {
    #[error("Escape byte at offset {offset} is the last byte of the bitstream")]
    DanglingEscape { offset: usize },
    #[error("Byte 0x{got:02X} at offset {offset} follows an escape byte but does not encode a reserved pattern")]
    NotAReservedPattern { offset: usize, got: u8 },
    #[error("Reserved byte 0x{got:02X} at offset {offset} appears without an escape byte")]
    ReservedNotEscaped { offset: usize, got: u8 },
    #[error("Bytes at offset {offset} are not a UTF-8 encoded character from U+0000 to U+00FF")]
    NotACodeWord { offset: usize },
}

/// Returns true for the 34 code words that must not be written as a plain byte.
pub const fn is_reserved(code: u8) -> bool {
    code <= 0x1F || code == 0x7F || code == ESCAPE_BYTE
}

/// The output of escaping a single code word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaped {
    Plain(u8),
    Pair(u8),
}

impl Escaped {
    pub fn is_escape(&self) -> bool {
        matches!(self, Escaped::Pair(_))
    }

    pub fn write_to(self, output: &mut Vec<u8>) {
        match self {
            Escaped::Plain(code) => push_code_word(output, code),
            Escaped::Pair(code) => {
                output.push(ESCAPE_BYTE);
                push_code_word(output, code);
            }
        }
    }
}

/// Codes at or above 0x80 take two bytes.
fn push_code_word(output: &mut Vec<u8>, code: u8) {
    let mut utf8 = [0u8; 2];
    output.extend_from_slice(char::from(code).encode_utf8(&mut utf8).as_bytes());
}

/// Decode the character starting at `offset` back into its code word.
/// Returns the code word and how many bytes it took.
fn code_word_at(source: &[u8], offset: usize) -> Option<Result<(u8, usize), UnescapeError>> {
    let first = *source.get(offset)?;
    Some(match first {
        0x00..=0x7F => Ok((first, 1)),
        // U+0080..=U+00FF, lead byte 0b110000xx
        0xC2 | 0xC3 => match source.get(offset + 1) {
            Some(&cont) if cont & 0xC0 == 0x80 => Ok((((first & 0x03) << 6) | (cont & 0x3F), 2)),
            _ => Err(UnescapeError::NotACodeWord { offset }),
        },
        _ => Err(UnescapeError::NotACodeWord { offset }),
    })
}

/// Escape a code word.
pub fn escape(code: u8) -> Escaped {
    if is_reserved(code) {
        Escaped::Pair(code | FLIP_BIT)
    } else {
        Escaped::Plain(code)
    }
}

/// Recover the reserved code word from the byte that followed an escape byte.
pub fn unescape_pair(second: u8) -> Option<u8> {
    let code = second & !FLIP_BIT;
    if second & FLIP_BIT != 0 && is_reserved(code) {
        Some(code)
    } else {
        None
    }
}

/// Iterates over the code words of an escaped byte sequence.
pub struct Unescaper<'s> {
    source: &'s [u8],
    idx: usize,
}

impl<'s> Unescaper<'s> {
    pub fn new(source: &'s [u8]) -> Self {
        Unescaper { source, idx: 0 }
    }

    /// Offset of the next unread byte in the escaped source.
    pub fn offset(&self) -> usize {
        self.idx
    }
}

impl Iterator for Unescaper<'_> {
    type Item = Result<u8, UnescapeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.idx;
        let (code, len) = match code_word_at(self.source, offset)? {
            Ok(decoded) => decoded,
            Err(e) => {
                self.idx = self.source.len();
                return Some(Err(e));
            }
        };
        self.idx += len;
        if code != ESCAPE_BYTE {
            if is_reserved(code) {
                return Some(Err(UnescapeError::ReservedNotEscaped { offset, got: code }));
            }
            return Some(Ok(code));
        }

        let second_offset = self.idx;
        let (second, len) = match code_word_at(self.source, second_offset) {
            None => return Some(Err(UnescapeError::DanglingEscape { offset })),
            Some(Err(e)) => {
                self.idx = self.source.len();
                return Some(Err(e));
            }
            Some(Ok(decoded)) => decoded,
        };
        self.idx += len;
        Some(unescape_pair(second).ok_or(UnescapeError::NotAReservedPattern {
            offset: second_offset,
            got: second,
        }))
    }
}

/// Unescape a whole bitstream into its code words.
pub fn unescape_all(source: &[u8]) -> Result<Vec<u8>, UnescapeError> {
    Unescaper::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn every_pattern_survives() {
        for code in 0..=255u8 {
            let mut out = Vec::new();
            escape(code).write_to(&mut out);
            assert_eq!(vec![code], unescape_all(&out).unwrap(), "code word {code:#010b}");
        }
    }

    #[test]
    fn reserved_set_is_exactly_34_patterns() {
        let reserved = (0..=255u8).filter(|c| is_reserved(*c)).count();
        assert_eq!(reserved, 34);
        for code in 0..=255u8 {
            assert_eq!(escape(code).is_escape(), is_reserved(code));
            if is_reserved(code) {
                assert_eq!(code & FLIP_BIT, 0);
            }
        }
    }

    #[test]
    fn tab_and_backslash_are_escaped() {
        assert_eq!(escape(0x09), Escaped::Pair(0x89));
        assert_eq!(escape(b'\\'), Escaped::Pair(0xDC));
        assert_eq!(escape(b'a'), Escaped::Plain(b'a'));
        assert_eq!(escape(0xFF), Escaped::Plain(0xFF));
    }

    #[test]
    fn rejects_broken_escapes() {
        assert_eq!(
            unescape_all(b"ab\\"),
            Err(UnescapeError::DanglingEscape { offset: 2 })
        );
        assert_eq!(
            unescape_all(b"\\a"),
            Err(UnescapeError::NotAReservedPattern { offset: 1, got: b'a' })
        );
        assert_eq!(
            unescape_all(&[b'a', 0x0A]),
            Err(UnescapeError::ReservedNotEscaped { offset: 1, got: 0x0A })
        );
        // U+0100 is past the code word range
        assert_eq!(
            unescape_all(&[b'\\', 0xC4, 0x80]),
            Err(UnescapeError::NotACodeWord { offset: 1 })
        );
    }

    #[test]
    fn high_code_words_are_utf8() {
        let mut out = Vec::new();
        escape(0xF0).write_to(&mut out);
        escape(0x09).write_to(&mut out);
        escape(b'a').write_to(&mut out);
        assert_eq!(out, [0xC3, 0xB0, b'\\', 0xC2, 0x89, b'a']);
        assert_eq!(core::str::from_utf8(&out), Ok("\u{f0}\\\u{89}a"));
        assert_eq!(unescape_all(&out).unwrap(), [0xF0, 0x09, b'a']);

        // a raw high byte is not a character on its own
        assert_eq!(
            unescape_all(&[b'a', 0xF0]),
            Err(UnescapeError::NotACodeWord { offset: 1 })
        );
    }
}
