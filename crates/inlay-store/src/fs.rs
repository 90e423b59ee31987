use std::path::Path;

/// Filesystem seam between the blob store and its host application.
///
/// The editing application that embeds the store owns the real vault —
/// the store only needs these five primitives from it. Implementations
/// over anything path-addressable work: the bundled [`OsFs`] goes
/// straight to `std::fs`, tests can substitute an in-memory or
/// failure-injecting vault.
///
/// ```text
/// Store operation            VaultFs calls
/// ─────────────────────────  ─────────────────────────────────────────
/// open                       create_dir_all, exists, write, read
/// insert / delete / …        read, write (tmp), rename
/// resolve                    read
/// ```
///
/// All methods return `std::io::Error`; the store maps every failure to
/// [`StoreError::Storage`](crate::StoreError::Storage) with the path that
/// was being touched. `rename` must be atomic on the backing medium —
/// the store relies on it so a failed write leaves the previous map file
/// intact rather than a truncated one.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; a single store handle may be
/// shared across threads (mutations are serialized by the store itself).
pub trait VaultFs: Send + Sync {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the entire file at `path` as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Create or replace the file at `path` with `contents`.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    /// Create the directory at `path`, including missing parents.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Atomically move the file at `from` over `to`.
    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()>;
}

/// [`VaultFs`] over the local filesystem via `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFs;

impl VaultFs for OsFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        std::fs::rename(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_fs_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let fs = OsFs;
        let nested = dir.path().join("a/b");
        fs.create_dir_all(&nested).unwrap();

        let file = nested.join("f.txt");
        assert!(!fs.exists(&file));
        fs.write(&file, "hello").unwrap();
        assert!(fs.exists(&file));
        assert_eq!(fs.read_to_string(&file).unwrap(), "hello");

        let moved = nested.join("g.txt");
        fs.rename(&file, &moved).unwrap();
        assert!(!fs.exists(&file));
        assert_eq!(fs.read_to_string(&moved).unwrap(), "hello");
    }

    #[test]
    fn read_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = OsFs.read_to_string(&dir.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
