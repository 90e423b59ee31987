//! End-to-end blob store properties over a real on-disk vault:
//! dedup idempotence, content addressing, round trips, destination
//! validation, the persisted JSON shape, and lost-update safety under
//! concurrent inserts.

use std::collections::BTreeSet;
use std::sync::Arc;

use inlay_store::{BlobStore, OsFs, StoreConfig, StoreError};
use inlay_tests::{open_store, payload};

#[test]
fn dedup_is_idempotent_across_reopen() {
    let vault = tempfile::tempdir().unwrap();

    let first = {
        let store = open_store(vault.path());
        store.insert(&payload(1), "note.md").unwrap()
    };

    // A second handle over the same vault sees the same entry.
    let store = open_store(vault.path());
    let second = store.insert(&payload(1), "other.md").unwrap();
    assert_eq!(first, second);
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn content_addressing_distinguishes_payloads() {
    let vault = tempfile::tempdir().unwrap();
    let store = open_store(vault.path());

    let ids: BTreeSet<String> = (0..5)
        .map(|n| store.insert(&payload(n), "note.md").unwrap())
        .collect();
    assert_eq!(ids.len(), 5);
    assert_eq!(store.identifiers().unwrap(), ids);
}

#[test]
fn round_trip_resolves_exact_payload() {
    let vault = tempfile::tempdir().unwrap();
    let store = open_store(vault.path());

    for n in 0..3 {
        let p = payload(n);
        let id = store.insert(&p, "note.md").unwrap();
        assert_eq!(store.resolve(&id).unwrap().as_deref(), Some(p.as_str()));
    }
}

#[test]
fn empty_destination_is_rejected_and_store_untouched() {
    let vault = tempfile::tempdir().unwrap();
    let store = open_store(vault.path());
    store.insert(&payload(0), "note.md").unwrap();

    let err = store.insert(&payload(1), "").unwrap_err();
    assert!(matches!(err, StoreError::EmptyDestination));
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn map_file_is_flat_pretty_json() {
    let vault = tempfile::tempdir().unwrap();
    let store = open_store(vault.path());
    let id = store.insert(&payload(7), "note.md").unwrap();

    let text = std::fs::read_to_string(store.map_path()).unwrap();
    let parsed: std::collections::BTreeMap<String, String> =
        serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.get(&id), Some(&payload(7)));
    // Two-space indentation, one key per line.
    assert!(text.contains(&format!("\n  \"{id}\":")));
}

#[test]
fn failed_write_leaves_no_truncated_map() {
    let vault = tempfile::tempdir().unwrap();
    let store = open_store(vault.path());
    store.insert(&payload(0), "note.md").unwrap();

    // Delete the side-car directory out from under the store: the next
    // mutation has nowhere to write its temp file and must fail without
    // leaving a half-written map behind.
    let map_path = store.map_path();
    std::fs::remove_dir_all(map_path.parent().unwrap()).unwrap();
    let err = store.insert(&payload(1), "note.md").unwrap_err();
    assert!(matches!(err, StoreError::Storage { .. }));
    assert!(!map_path.exists());

    // Reopening lazily recreates an empty, parseable map.
    let store = open_store(vault.path());
    assert!(store.is_empty().unwrap());
}

#[test]
fn concurrent_distinct_inserts_suffer_no_lost_update() {
    let vault = tempfile::tempdir().unwrap();
    let store = Arc::new(open_store(vault.path()));

    let handles: Vec<_> = (0..16)
        .map(|n| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.insert(&payload(n), "note.md").unwrap())
        })
        .collect();

    let ids: BTreeSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ids.len(), 16, "each distinct payload got its own id");

    // Every insert survived the concurrent read-modify-write cycles.
    let store = BlobStore::open(Arc::new(OsFs), vault.path(), StoreConfig::default()).unwrap();
    assert_eq!(store.identifiers().unwrap(), ids);
    for n in 0..16 {
        let p = payload(n);
        assert!(
            store.entries().unwrap().values().any(|v| v == &p),
            "payload {n} must be present after concurrent inserts"
        );
    }
}

#[test]
fn concurrent_same_payload_inserts_dedup_to_one_entry() {
    let vault = tempfile::tempdir().unwrap();
    let store = Arc::new(open_store(vault.path()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.insert(&payload(42), "note.md").unwrap())
        })
        .collect();

    let ids: BTreeSet<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(ids.len(), 1, "identical payloads must converge on one id");
    assert_eq!(store.len().unwrap(), 1);
}
