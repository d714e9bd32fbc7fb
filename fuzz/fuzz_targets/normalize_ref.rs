#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Some(identity) = citenet_core::normalize::normalize_cited_ref(input) {
            // Accepted identities always carry the three-column shape.
            assert!(identity.split(", ").count() >= 3);
        }
    }
});
