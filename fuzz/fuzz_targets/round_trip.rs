#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate ruhuff;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    match ruhuff::compress_to_vec(text) {
        Ok(packed) => assert_eq!(ruhuff::decompress(&packed).unwrap(), text),
        Err(e) => assert!(text.is_empty(), "{e}"),
    }
});
