use alloc::collections::BTreeMap;

use super::Path;

/// Maps symbols to their codes, and codes back to symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Path>,
    symbols: BTreeMap<Path, char>,
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn insert(&mut self, symbol: char, path: Path) {
        self.symbols.insert(path.clone(), symbol);
        self.codes.insert(symbol, path);
    }

    /// The code of `symbol`, if it is part of the alphabet.
    pub fn get(&self, symbol: char) -> Option<&Path> {
        self.codes.get(&symbol)
    }

    /// The symbol whose code is exactly `path`.
    pub fn symbol(&self, path: &Path) -> Option<char> {
        self.symbols.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Symbols and their codes, ordered by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (char, &Path)> + '_ {
        self.codes.iter().map(|(symbol, path)| (*symbol, path))
    }
}

#[test]
fn prefix_free() {
    use crate::frequency::FrequencyTable;
    use crate::tree::{build_tree, LabeledTree};

    let text = "It was the best of times, it was the worst of times.\n";
    let tree = LabeledTree::assign(build_tree(FrequencyTable::from_text(text).iter()).unwrap());
    let table = tree.code_table();
    assert_eq!(table.len(), FrequencyTable::from_text(text).len());

    for (a, code_a) in table.iter() {
        assert_eq!(table.symbol(code_a), Some(a));
        for (b, code_b) in table.iter() {
            if a != b {
                assert!(
                    !code_b.bits().starts_with(code_a.bits()),
                    "{a:?} ({code_a}) is a prefix of {b:?} ({code_b})"
                );
            }
        }
    }
}
