
use crate::common::escape::is_reserved;
use crate::errors::ErrorKind;
use crate::tree::Label;
use crate::{compress, compress_to_vec, decompress, decompress_artifact};
use alloc::string::String;
use alloc::vec::Vec;

/// Spell out a bit pattern with `zero` for every '0' and `one` for every '1'.
fn text_from_bits(pattern: &str, zero: char, one: char) -> String {
    pattern
        .chars()
        .map(|bit| if bit == '1' { one } else { zero })
        .collect()
}

#[test]
fn aaabbc_end_to_end() {
    let artifact = compress("aaabbc").unwrap();
    use Label::*;
    assert_eq!(
        artifact.preorder,
        [Internal(0), Symbol('a'), Internal(1), Symbol('c'), Symbol('b')]
    );
    assert_eq!(artifact.valid_bits, 1);

    let mut expected = Vec::from([b'\\', 0xC2, 0x9F, b'\\', 0xC2, 0x80, b'1', b'\n']);
    expected.extend_from_slice(b"Inorder={a,0,c,1,b,}\nPreorder={0,a,1,c,b,}");
    let packed = compress_to_vec("aaabbc").unwrap();
    assert_eq!(packed, expected);
    assert_eq!(decompress(&packed).unwrap(), "aaabbc");
}

#[test]
fn backslash_code_word_is_escaped() {
    // '\t' = 0 and '\\' = 1, four of each so the first one seen is the smaller
    let text = text_from_bits("01011100", '\t', '\\');
    let artifact = compress(&text).unwrap();
    // 0xDC is U+00DC, 0x80 is U+0080
    assert_eq!(artifact.bitstream, [b'\\', 0xC3, 0x9C, b'\\', 0xC2, 0x80]);
    assert_eq!(artifact.valid_bits, 0);
    assert_eq!(decompress_artifact(&artifact).unwrap(), text);
}

#[test]
fn tab_code_word_is_escaped() {
    // '\\' = 0 and '\t' = 1, six of each
    let text = text_from_bits("000010011111", '\\', '\t');
    let artifact = compress(&text).unwrap();
    // 0x89 is U+0089, the plain 0xF0 is U+00F0
    assert_eq!(artifact.bitstream, [b'\\', 0xC2, 0x89, 0xC3, 0xB0]);
    assert_eq!(artifact.valid_bits, 4);

    let packed = artifact.to_vec();
    assert_eq!(decompress(&packed).unwrap(), text);
}

#[test]
fn backslash_and_tab_in_prose() {
    let text = "C:\\Program Files\\\tcolumn\ttwo\\\n\\\\ done";
    let packed = compress_to_vec(text).unwrap();
    let first_line = packed.split(|&b| b == b'\n').next().unwrap();
    // a reserved byte only shows up as the start of an escape pair
    assert!(first_line.iter().all(|&b| !is_reserved(b) || b == b'\\'));
    assert_eq!(decompress(&packed).unwrap(), text);
}

#[test]
fn artifact_is_utf8_text() {
    let original = "hello world, \u{0}\u{7f} and ünïcödé";
    let packed = compress_to_vec(original).unwrap();
    let text = core::str::from_utf8(&packed).unwrap();
    let first_line = text.lines().next().unwrap();
    // every code word is one character from U+0000 to U+00FF
    assert!(first_line.chars().all(|c| u32::from(c) <= 0xFF));
    assert_eq!(decompress(text.as_bytes()).unwrap(), original);
}

#[test]
fn crlf_artifact_decodes() {
    // no newline in the text itself, a newline leaf would pick up the `\r` too
    let text = "line one, line two";
    let packed = compress_to_vec(text).unwrap();
    let mut crlf = Vec::new();
    for &b in &packed {
        if b == b'\n' {
            crlf.push(b'\r');
        }
        crlf.push(b);
    }
    assert_eq!(decompress(&crlf).unwrap(), text);
}

#[test]
fn five_leftover_bits() {
    // one bit per symbol, 13 bits make one full word and 5 leftover bits
    let text = "ababababababa";
    let artifact = compress(text).unwrap();
    assert_eq!(artifact.valid_bits, 5);
    // 0xAA and 0xA8, two bytes each
    assert_eq!(artifact.bitstream.len(), 4);
    let packed = artifact.to_vec();
    assert_eq!(packed[4], b'5');
    assert_eq!(decompress(&packed).unwrap(), text);
}

#[test]
fn single_symbol_text() {
    let text = "ooooooooooo";
    let packed = compress_to_vec(text).unwrap();
    assert!(packed.ends_with(b"Inorder={o,}\nPreorder={o,}"));
    assert_eq!(decompress(&packed).unwrap(), text);

    assert_eq!(decompress(&compress_to_vec("7").unwrap()).unwrap(), "7");
}

#[test]
fn error_kinds() {
    assert_eq!(compress("").unwrap_err().kind(), ErrorKind::InvalidInput);

    assert_eq!(
        decompress(b"no newline at all").unwrap_err().kind(),
        ErrorKind::CorruptArtifact
    );
    assert_eq!(
        decompress(b"@9\nInorder={a,}\nPreorder={a,}").unwrap_err().kind(),
        ErrorKind::CorruptArtifact
    );
    // unescaped control character in the bitstream
    assert_eq!(
        decompress(b"\x01@1\nInorder={a,}\nPreorder={a,}")
            .unwrap_err()
            .kind(),
        ErrorKind::CorruptArtifact
    );
    // the traversals disagree
    assert_eq!(
        decompress(b"@2\nInorder={a,0,b,}\nPreorder={0,b,a,}")
            .unwrap_err()
            .kind(),
        ErrorKind::MalformedTree
    );
    assert_eq!(
        decompress(b"@2\nInorder={a,0,b\nPreorder={0,a,b,}")
            .unwrap_err()
            .kind(),
        ErrorKind::MalformedTree
    );
}

#[test]
fn bitstream_ending_inside_a_code() {
    // a = 0, c = 10, b = 11; 0x40 with 2 valid bits is "01"
    let packed = b"@2\nInorder={a,0,c,1,b,}\nPreorder={0,a,1,c,b,}";
    let err = decompress(packed).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptArtifact);
}

#[cfg(feature = "std")]
#[test]
fn streams_report_lengths() {
    use crate::{compress_stream, decompress_stream};

    let text = "streaming ünïcödé text\n";
    let mut packed = Vec::new();
    let report = compress_stream(text.as_bytes(), &mut packed).unwrap();
    assert_eq!(report.text_len, text.chars().count());
    assert_eq!(report.artifact_len, packed.len());
    assert_eq!(
        report.bitstream_line_len,
        packed.iter().position(|&b| b == b'\n').unwrap()
    );

    let mut restored = Vec::new();
    let back = decompress_stream(packed.as_slice(), &mut restored).unwrap();
    assert_eq!(restored, text.as_bytes());
    assert_eq!(back, report);

    let invalid_utf8: &[u8] = &[0x66, 0xFF, 0x6F];
    let err = compress_stream(invalid_utf8, &mut Vec::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}
