use std::collections::BTreeSet;

use crate::marker::{FENCE_CLOSE, FENCE_OPEN, ID_LABEL};

/// Reserved identifier for the legacy encrypted-data slot.
///
/// Old vaults stored an encrypted blob under this fixed key before
/// identifiers became UUIDs. It is treated as permanently live: the
/// scanner includes it in every live set whether or not any document
/// references it, so the sweep can never collect it.
pub const SENTINEL_ID: &str = "encrypted-data";

/// Extract every marker identifier referenced by one document.
///
/// Walks the text line by line looking for fenced blocks opened by
/// ```` ```image-base64 ```` and closed by ```` ``` ````, and collects
/// the value after the `id:` label inside each. Best-effort by design —
/// scanning must be total over arbitrary, partially hand-mangled
/// documents, so nothing here can fail:
///
/// - a block with no `id:` line contributes nothing
/// - an unterminated fence at end of input contributes nothing
/// - field order is irrelevant (`id:` before `name:` still parses)
/// - text outside marker blocks is ignored entirely
pub fn scan_document(text: &str, live: &mut BTreeSet<String>) {
    let mut in_marker = false;
    let mut block_id: Option<String> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if !in_marker {
            if trimmed == FENCE_OPEN {
                in_marker = true;
                block_id = None;
            }
            continue;
        }
        if trimmed == FENCE_CLOSE {
            if let Some(id) = block_id.take() {
                live.insert(id);
            }
            in_marker = false;
            continue;
        }
        if block_id.is_none() {
            if let Some(rest) = trimmed.strip_prefix(ID_LABEL) {
                let value = rest.trim();
                if !value.is_empty() {
                    block_id = Some(value.to_owned());
                }
            }
        }
    }
    // A fence still open at end of input is malformed: its id (if any)
    // is dropped with the unterminated block.
}

/// Union the live identifiers across a whole corpus of documents.
///
/// This is the "mark" half of mark-and-sweep: the returned set is every
/// identifier at least one document still references, plus the
/// permanently live [`SENTINEL_ID`].
pub fn scan_documents<I, S>(documents: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut live = BTreeSet::new();
    for doc in documents {
        scan_document(doc.as_ref(), &mut live);
    }
    live.insert(SENTINEL_ID.to_owned());
    live
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{Marker, render_marker};

    fn scan_one(text: &str) -> BTreeSet<String> {
        let mut live = BTreeSet::new();
        scan_document(text, &mut live);
        live
    }

    #[test]
    fn finds_id_in_canonical_marker() {
        let doc = render_marker(&Marker::new("cat.png", "id-cat"));
        assert_eq!(scan_one(&doc), BTreeSet::from(["id-cat".to_owned()]));
    }

    #[test]
    fn field_order_is_irrelevant() {
        let doc = "```image-base64\nid: id-first\nname: later.png\n```\n";
        assert_eq!(scan_one(doc), BTreeSet::from(["id-first".to_owned()]));
    }

    #[test]
    fn marker_without_id_contributes_nothing() {
        let doc = "```image-base64\nname: orphan.png\n```\n";
        assert!(scan_one(doc).is_empty());
    }

    #[test]
    fn unterminated_fence_contributes_nothing() {
        let doc = "```image-base64\nname: x.png\nid: id-lost\n";
        assert!(scan_one(doc).is_empty());
    }

    #[test]
    fn empty_id_value_is_skipped() {
        let doc = "```image-base64\nname: x.png\nid:\n```\n";
        assert!(scan_one(doc).is_empty());
    }

    #[test]
    fn other_fences_are_ignored() {
        let doc = "```rust\nlet id = 1; // id: not-a-marker\n```\n";
        assert!(scan_one(doc).is_empty());
    }

    #[test]
    fn multiple_blocks_and_shared_ids_union() {
        let doc = "\
```image-base64
name: a.png
id: shared
```

prose in between

```image-base64
name: b.png
id: shared
```

```image-base64
name: c.png
id: unique
```
";
        assert_eq!(
            scan_one(doc),
            BTreeSet::from(["shared".to_owned(), "unique".to_owned()])
        );
    }

    #[test]
    fn indented_fields_still_parse() {
        let doc = "```image-base64\n  name: x.png\n  id: id-indent\n```\n";
        assert_eq!(scan_one(doc), BTreeSet::from(["id-indent".to_owned()]));
    }

    #[test]
    fn corpus_scan_always_includes_sentinel() {
        let live = scan_documents(Vec::<String>::new());
        assert_eq!(live, BTreeSet::from([SENTINEL_ID.to_owned()]));
    }

    #[test]
    fn corpus_scan_unions_across_documents() {
        let a = "```image-base64\nname: a\nid: id-a\n```\n";
        let b = "```image-base64\nname: b\nid: id-b\n```\n";
        let live = scan_documents([a, b]);
        assert!(live.contains("id-a"));
        assert!(live.contains("id-b"));
        assert!(live.contains(SENTINEL_ID));
        assert_eq!(live.len(), 3);
    }

    #[test]
    fn malformed_corpus_never_panics() {
        for doc in [
            "",
            "```",
            "``````",
            "```image-base64",
            "```image-base64\n```",
            "id: floating-outside-any-block\n",
            "```image-base64\nid: a\n```\n```image-base64\nname: only\n```",
        ] {
            scan_one(doc);
        }
    }
}
