/// Reads the bits of unescaped code words, most significant bit first.
///
/// Only the first `valid_bits` bits of the last code word are served, the rest is padding.
pub struct BitReader<'s> {
    idx: usize, //index counts bits already read
    total: usize,
    source: &'s [u8],
}

impl<'s> BitReader<'s> {
    /// Returns `None` for an empty source, there is always at least the padded last word.
    pub fn new(source: &'s [u8], valid_bits: u8) -> Option<BitReader<'s>> {
        let full_words = source.len().checked_sub(1)?;
        Some(BitReader {
            idx: 0,
            total: full_words * 8 + usize::from(valid_bits.min(7)),
            source,
        })
    }

    pub fn bits_left(&self) -> usize {
        self.total - self.idx
    }

    pub fn bits_read(&self) -> usize {
        self.idx
    }

    pub fn get_bit(&mut self) -> Option<bool> {
        if self.idx >= self.total {
            return None;
        }
        let word = self.source[self.idx / 8];
        let bit = (word >> (7 - self.idx % 8)) & 1 == 1;
        self.idx += 1;
        Some(bit)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.get_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.bits_left(), Some(self.bits_left()))
    }
}

#[test]
fn msb_first_and_truncated() {
    let words = [0b1010_0000, 0b1100_0000];
    let reader = BitReader::new(&words, 3).unwrap();
    let bits: alloc::vec::Vec<bool> = reader.collect();
    assert_eq!(
        bits,
        [true, false, true, false, false, false, false, false, true, true, false]
    );
}

#[test]
fn padded_word_without_valid_bits() {
    let words = [0xFF, 0x00];
    let mut reader = BitReader::new(&words, 0).unwrap();
    assert_eq!(reader.bits_left(), 8);
    assert_eq!(reader.by_ref().filter(|bit| *bit).count(), 8);
    assert_eq!(reader.bits_read(), 8);
    assert_eq!(reader.get_bit(), None);

    assert!(BitReader::new(&[], 0).is_none());
}
