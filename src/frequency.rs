//! Contains [`FrequencyTable`], the symbol histogram a code tree is built from.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// How often a single symbol occurs in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub symbol: char,
    pub count: usize,
}

/// Counts symbol occurrences.
///
/// Entries are kept in the order their symbol was first seen. The tree builder
/// uses this order to break ties between equally weighted leaves, which keeps
/// compression deterministic for a given input.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    /// symbol -> index into `entries`
    index: BTreeMap<char, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut table = Self::new();
        table.add_text(text);
        table
    }

    /// Count every symbol of `text`. Can be called repeatedly, e.g. once per line.
    pub fn add_text(&mut self, text: &str) {
        for symbol in text.chars() {
            self.add_symbol(symbol);
        }
    }

    pub fn add_symbol(&mut self, symbol: char) {
        match self.index.get(&symbol) {
            Some(&idx) => self.entries[idx].count += 1,
            None => {
                self.index.insert(symbol, self.entries.len());
                self.entries.push(FrequencyEntry { symbol, count: 1 });
            }
        }
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of symbols counted, duplicates included.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn count(&self, symbol: char) -> usize {
        self.index
            .get(&symbol)
            .map_or(0, |&idx| self.entries[idx].count)
    }

    /// Entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = FrequencyEntry> + '_ {
        self.entries.iter().copied()
    }
}
