#![no_main]

use libfuzzer_sys::fuzz_target;

// The record parser must be total: any byte soup decodes (UTF-8 or not)
// and parses without panicking.
fuzz_target!(|data: &[u8]| {
    let input: String = match std::str::from_utf8(data) {
        Ok(s) => s.to_owned(),
        Err(_) => data.iter().map(|&b| char::from(b)).collect(),
    };
    let _ = citenet_core::Parser::parse_str(&input);
});
