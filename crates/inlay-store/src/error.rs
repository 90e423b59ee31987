use std::path::PathBuf;

/// Errors that can occur in the blob store and its supporting layers.
///
/// The store validates at three levels: caller-supplied context (the
/// destination document for an insert), the backing medium (every
/// filesystem touch goes through the [`VaultFs`](crate::fs::VaultFs)
/// seam), and the persisted map itself (which must parse as a flat JSON
/// object). A resolve miss is deliberately *not* represented here — it is
/// the `Ok(None)` result variant of
/// [`BlobStore::resolve`](crate::BlobStore::resolve), a normal
/// outcome the caller renders as a placeholder rather than a crash.
///
/// Error hierarchy:
///
/// ```text
///   StoreError
///   ├── EmptyDestination    ← insert called with no destination document
///   ├── Encoding            ← source bytes for a payload could not be read
///   ├── Storage             ← backing medium unreachable or unwritable
///   ├── Corrupt             ← persisted map is not a flat JSON object
///   └── IdSpaceExhausted    ← allocator hit its collision retry cap
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `insert` was called with an empty destination document path.
    ///
    /// Surfaced to the caller as a user-facing notice, not a hard store
    /// failure: the store is left untouched and no identifier is burned.
    #[error("no destination document — paste target is empty")]
    EmptyDestination,

    /// The raw image bytes backing a payload could not be read.
    ///
    /// Raised by callers feeding the encoder from a transient handle
    /// (a dropped file, a clipboard stream). The encoder itself is pure;
    /// this variant exists so the read failure travels in the same
    /// taxonomy as store failures.
    #[error("cannot read image source: {reason}")]
    Encoding { reason: String },

    /// The backing medium failed underneath a store operation.
    ///
    /// Wraps the `std::io::Error` from the [`VaultFs`](crate::fs::VaultFs)
    /// call that failed, together with the path it was touching. The
    /// in-memory snapshot held by the failing operation is discarded —
    /// after a `Storage` error the next operation reloads from disk.
    #[error("storage failure at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted map file exists but does not parse as a flat JSON
    /// object of string keys to string payloads.
    ///
    /// Surfaced loudly instead of resetting the file: silently replacing
    /// a corrupt map with `{}` would orphan every payload it held.
    #[error("store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The identifier allocator exhausted its retry cap without finding
    /// an unused identifier.
    ///
    /// With 122 bits of randomness per attempt this is unreachable in
    /// practice; the cap exists so a broken randomness source fails with
    /// a diagnosis instead of spinning forever.
    #[error("no free identifier after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },
}
