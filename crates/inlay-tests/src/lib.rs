//! Integration test harness for the inlay workspace.
//!
//! The production crates are exercised end-to-end from `tests/`:
//!
//! - `store.rs` — dedup, content addressing, round trips, destination
//!   validation, persistence format, concurrency.
//! - `gc.rs` — scan → diff → sweep over a real on-disk vault, including
//!   malformed marker corpora.
//! - `review.rs` — the interactive disposition state machine against a
//!   live store, including interrupted sessions.
//!
//! Shared fixture helpers live here so every test file builds vaults
//! the same way.

use std::path::Path;
use std::sync::Arc;

use inlay_store::{BlobStore, OsFs, StoreConfig};

/// Open a default-configured store over `vault_root`.
///
/// # Panics
///
/// Panics on open failure — fixtures run against a fresh tempdir, so a
/// failure here is a harness bug.
#[must_use]
pub fn open_store(vault_root: &Path) -> BlobStore {
    BlobStore::open(Arc::new(OsFs), vault_root, StoreConfig::default())
        .expect("open store over temp vault")
}

/// A small distinct data-URI payload for test index `n`.
#[must_use]
pub fn payload(n: usize) -> String {
    inlay_store::encode_data_uri(format!("image-bytes-{n}").as_bytes(), "image/png")
}

/// Write a markdown document under the vault, creating parent dirs.
///
/// # Panics
///
/// Panics on I/O failure (harness bug, as above).
pub fn write_doc(vault_root: &Path, rel: &str, text: &str) {
    let path = vault_root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create doc parent dirs");
    }
    std::fs::write(path, text).expect("write test document");
}
