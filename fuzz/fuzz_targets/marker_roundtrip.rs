#![no_main]

use libfuzzer_sys::fuzz_target;
use inlay_gc::{render_marker, scan_documents, Marker};

// Fuzz target: render->scan roundtrip.
//
// Any single-line name/id pair the canonical writer emits must be
// recovered by the scanner. Multi-line or fence-like values are out of
// contract (identifiers are UUIDs, names are file names), so inputs
// containing newlines or backticks are skipped.
fuzz_target!(|input: (&str, &str)| {
    let (name, id) = input;
    let id = id.trim();
    if id.is_empty()
        || name.contains('\n')
        || id.contains('\n')
        || name.contains('`')
        || id.contains('`')
    {
        return;
    }

    let doc = render_marker(&Marker::new(name, id));
    let live = scan_documents([doc.as_str()]);
    assert!(live.contains(id), "rendered id must scan back out");
});
