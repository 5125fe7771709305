use std::collections::BTreeSet;

use proptest::prelude::*;
use ruhuff::common::escape::{escape, unescape_all, Escaped};
use ruhuff::frequency::FrequencyTable;
use ruhuff::tree::{build_tree, reconstruct, Label, LabeledTree};
use ruhuff::{compress, compress_to_vec, decompress};

proptest! {
    #[test]
    fn test_round_trip(text in "\\PC{1,300}") {
        let packed = compress_to_vec(&text).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), text);
    }

    #[test]
    fn test_round_trip_control_heavy(text in "[\\x00-\\x1f\\x7f\\\\0-9{},a]{1,200}") {
        let artifact = compress(&text).unwrap();
        prop_assert!(!artifact.bitstream.contains(&b'\n'));
        prop_assert!(std::str::from_utf8(&artifact.bitstream).is_ok());
        prop_assert_eq!(decompress(&artifact.to_vec()).unwrap(), text);
    }

    #[test]
    fn test_labels_are_unique(text in "\\PC{1,300}") {
        let tree = LabeledTree::assign(build_tree(FrequencyTable::from_text(&text).iter()).unwrap());
        let preorder = tree.preorder_labels();
        let distinct: BTreeSet<Label> = preorder.iter().copied().collect();
        prop_assert_eq!(distinct.len(), preorder.len());

        let rebuilt = reconstruct(&preorder, &tree.inorder_labels()).unwrap();
        prop_assert_eq!(rebuilt.code_table(), tree.code_table());
    }

    #[test]
    fn test_codes_are_prefix_free(text in "[a-h]{1,500}") {
        let codes = LabeledTree::assign(build_tree(FrequencyTable::from_text(&text).iter()).unwrap())
            .code_table();
        let paths: Vec<String> = codes.iter().map(|(_, path)| path.to_string()).collect();
        for a in &paths {
            for b in &paths {
                prop_assert!(a == b || !b.starts_with(a.as_str()));
            }
        }
    }
}

#[test]
fn test_escape_is_injective() {
    let mut seen = BTreeSet::new();
    for code in 0..=255u8 {
        let mut encoded = Vec::new();
        escape(code).write_to(&mut encoded);
        assert!(seen.insert(encoded.clone()));
        assert_eq!(unescape_all(&encoded).unwrap(), [code]);
        if let Escaped::Pair(second) = escape(code) {
            assert!(second >= 0x80);
        }
    }
}
