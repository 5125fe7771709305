#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate ruhuff;

fuzz_target!(|data: &[u8]| {
    /* ignore errors. It just should never panic on invalid input */
    _ = ruhuff::decompress(data);
});
