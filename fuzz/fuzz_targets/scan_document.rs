#![no_main]

use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;

// Fuzz target: scan_document over arbitrary text.
//
// The scanner must be total: any byte soup that happens to be valid
// UTF-8 — half-open fences, id labels outside blocks, nested backticks —
// must produce a (possibly empty) live set without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let mut live = BTreeSet::new();
        inlay_gc::scan_document(text, &mut live);
    }
});
