use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::fs::VaultFs;
use crate::id;

/// Content-addressed map from identifier to encoded image payload,
/// persisted as a single pretty-printed JSON object inside the vault.
///
/// ```text
/// <vault>/.image-base64/image-base64.json
/// {
///   "3b2a…-…": "data:image/png;base64,…",
///   "9f04…-…": "data:image/jpeg;base64,…"
/// }
/// ```
///
/// The store is deliberately simple: the whole map is loaded on every
/// access and rewritten on every mutation. That is the right tradeoff
/// for personal-scale vaults (tens to hundreds of images) and is kept
/// behind this interface so a journaled or embedded-KV backend could
/// replace it without touching callers. Two consequences callers should
/// know about:
///
/// - Dedup lookup is a linear scan over payload values. Fine at the
///   expected scale, a bottleneck if the map grows into the thousands.
/// - Every mutation is a full read-modify-write cycle. The store
///   serializes these through an internal lock, so one handle shared
///   across threads is safe; two *processes* opening the same vault are
///   not coordinated.
///
/// Writes go to a temporary file first and are renamed over the map, so
/// a failed write leaves the previous map intact — old or new, never a
/// truncated file.
pub struct BlobStore {
    fs: Arc<dyn VaultFs>,
    vault_root: PathBuf,
    config: StoreConfig,
    /// Serializes every read-modify-write cycle. Without this, two
    /// simultaneous inserts can each load the same snapshot and one
    /// write silently clobbers the other's entry.
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStore")
            .field("vault_root", &self.vault_root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BlobStore {
    /// Open the store for a vault, creating the side-car directory and
    /// an empty map file if they do not exist yet.
    ///
    /// Idempotent: opening an already-initialized vault only validates
    /// that the persisted map parses.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] if the backing medium cannot be read or
    /// written; [`StoreError::Corrupt`] if an existing map file does not
    /// parse as a flat JSON object of strings.
    pub fn open(
        fs: Arc<dyn VaultFs>,
        vault_root: impl Into<PathBuf>,
        config: StoreConfig,
    ) -> Result<Self, StoreError> {
        let store = Self {
            fs,
            vault_root: vault_root.into(),
            config,
            write_lock: Mutex::new(()),
        };

        let dir = store.config.store_dir(&store.vault_root);
        store
            .fs
            .create_dir_all(&dir)
            .map_err(|e| storage(&dir, e))?;

        if !store.fs.exists(&store.map_path()) {
            store.persist(&BTreeMap::new())?;
        }
        // Validate early so a corrupt map fails at open, not mid-paste.
        store.load()?;
        Ok(store)
    }

    /// Insert an encoded payload destined for `destination`, returning
    /// its identifier.
    ///
    /// Content-addressed: if an entry with a byte-identical payload
    /// already exists, its identifier is returned and nothing is
    /// written. Otherwise a fresh identifier is allocated, the entry is
    /// added, and the full map is persisted.
    ///
    /// `destination` is the document the caller is about to embed the
    /// marker into; it is context, not storage — the store only rejects
    /// the degenerate case of an empty destination, which means the
    /// host had no active document to paste into.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyDestination`] if `destination` is empty or
    /// whitespace (store untouched); [`StoreError::Storage`] /
    /// [`StoreError::Corrupt`] on backing-medium failures;
    /// [`StoreError::IdSpaceExhausted`] if allocation hit its retry cap.
    pub fn insert(&self, payload: &str, destination: &str) -> Result<String, StoreError> {
        if destination.trim().is_empty() {
            return Err(StoreError::EmptyDestination);
        }

        let _guard = self.write_lock.lock().expect("store write lock poisoned");
        let mut map = self.load()?;

        // Linear scan over values: at most one entry per distinct
        // payload, so the first hit is the only hit.
        if let Some(existing) = map
            .iter()
            .find_map(|(key, value)| (value == payload).then(|| key.clone()))
        {
            return Ok(existing);
        }

        let identifier = id::allocate(&map)?;
        map.insert(identifier.clone(), payload.to_owned());
        self.persist(&map)?;
        Ok(identifier)
    }

    /// Look up the payload for `identifier` in the freshest snapshot.
    ///
    /// A miss is `Ok(None)` — the normal outcome for a marker whose
    /// entry was garbage-collected or hand-deleted, which the renderer
    /// handles with a placeholder.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] / [`StoreError::Corrupt`] if the map
    /// cannot be loaded.
    pub fn resolve(&self, identifier: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(identifier))
    }

    /// Remove the entry for `identifier`, persisting the map.
    ///
    /// Returns `true` if an entry was removed, `false` if the
    /// identifier was absent (a no-op that does not rewrite the file).
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] / [`StoreError::Corrupt`] on
    /// backing-medium failures.
    pub fn delete(&self, identifier: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().expect("store write lock poisoned");
        let mut map = self.load()?;
        if map.remove(identifier).is_none() {
            return Ok(false);
        }
        self.persist(&map)?;
        Ok(true)
    }

    /// Remove every listed identifier, persisting the map once at the
    /// end. Returns how many entries were actually removed.
    ///
    /// This is the batch form the automatic sweep prefers over repeated
    /// single deletes — one rewrite instead of N.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] / [`StoreError::Corrupt`] on
    /// backing-medium failures.
    pub fn delete_many<I, S>(&self, identifiers: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let _guard = self.write_lock.lock().expect("store write lock poisoned");
        let mut map = self.load()?;
        let mut removed = 0;
        for identifier in identifiers {
            if map.remove(identifier.as_ref()).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            self.persist(&map)?;
        }
        Ok(removed)
    }

    /// Snapshot of every identifier currently in the store.
    ///
    /// This is the "store keys" side of the garbage collector's diff.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] / [`StoreError::Corrupt`] if the map
    /// cannot be loaded.
    pub fn identifiers(&self) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.load()?.into_keys().collect())
    }

    /// Snapshot of the full identifier → payload map.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] / [`StoreError::Corrupt`] if the map
    /// cannot be loaded.
    pub fn entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        self.load()
    }

    /// Number of entries in the store.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] / [`StoreError::Corrupt`] if the map
    /// cannot be loaded.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }

    /// Whether the store holds no entries.
    ///
    /// # Errors
    ///
    /// [`StoreError::Storage`] / [`StoreError::Corrupt`] if the map
    /// cannot be loaded.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Path of the persisted map file.
    #[must_use]
    pub fn map_path(&self) -> PathBuf {
        self.config.store_file(&self.vault_root)
    }

    // ── Persistence ─────────────────────────────────────────────────────

    /// Load the full map from disk. A missing file reads as empty — the
    /// store is lazily created on first access.
    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let path = self.map_path();
        if !self.fs.exists(&path) {
            return Ok(BTreeMap::new());
        }
        let text = self
            .fs
            .read_to_string(&path)
            .map_err(|e| storage(&path, e))?;
        serde_json::from_str(&text).map_err(|e| StoreError::Corrupt { path, source: e })
    }

    /// Write the full map: pretty-printed JSON to a temporary sibling
    /// file, then an atomic rename over the real map. A failure at any
    /// step leaves the previous map file untouched.
    fn persist(&self, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let path = self.map_path();
        let tmp = path.with_extension("json.tmp");

        let mut text = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::Corrupt {
                path: path.clone(),
                source: e,
            })?;
        text.push('\n');

        self.fs.write(&tmp, &text).map_err(|e| storage(&tmp, e))?;
        self.fs.rename(&tmp, &path).map_err(|e| storage(&path, e))
    }
}

fn storage(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Storage {
        path: path.to_path_buf(),
        source,
    }
}
