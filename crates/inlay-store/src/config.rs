use std::path::{Path, PathBuf};

/// Configuration for a blob store's backing file.
///
/// Passed explicitly into [`BlobStore::open`](crate::BlobStore::open) —
/// there is no ambient process-wide settings object. Two knobs:
///
/// ```text
/// ┌────────────────┬──────────────────────────────┬────────────────────┐
/// │ Field          │ Purpose                      │ Default            │
/// ├────────────────┼──────────────────────────────┼────────────────────┤
/// │ directory      │ side-car dir inside the vault│ .image-base64      │
/// │ filename       │ persisted map file name      │ image-base64.json  │
/// └────────────────┴──────────────────────────────┴────────────────────┘
/// ```
///
/// The directory is resolved relative to the vault root the store is
/// opened against, and auto-created on first open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory (relative to the vault root) holding the store file.
    pub directory: String,
    /// File name of the persisted identifier → payload map.
    pub filename: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: ".image-base64".to_owned(),
            filename: "image-base64.json".to_owned(),
        }
    }
}

impl StoreConfig {
    /// Directory holding the store file, under `vault_root`.
    #[must_use]
    pub fn store_dir(&self, vault_root: &Path) -> PathBuf {
        vault_root.join(&self.directory)
    }

    /// Full path of the persisted map file, under `vault_root`.
    #[must_use]
    pub fn store_file(&self, vault_root: &Path) -> PathBuf {
        self.store_dir(vault_root).join(&self.filename)
    }
}
