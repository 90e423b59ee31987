use std::collections::BTreeSet;

use inlay_store::{BlobStore, StoreError};

/// How orphaned entries are disposed of after a scan.
///
/// Both modes compute the same orphan set; they differ only in who
/// decides per entry:
///
/// ```text
/// ┌─────────────┬────────────────────────────────────────────────────┐
/// │ Mode        │ Behavior                                           │
/// ├─────────────┼────────────────────────────────────────────────────┤
/// │ Interactive │ One orphan at a time through a ReviewSession;      │
/// │             │ each delete commits immediately.                   │
/// │ Automatic   │ Every orphan deleted unconditionally via           │
/// │             │ delete_many (single persist).                      │
/// └─────────────┴────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GcMode {
    /// Present each orphan for a keep/delete decision.
    #[default]
    Interactive,
    /// Delete every orphan without review.
    Automatic,
}

/// Outcome of an automatic sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepReport {
    /// Orphans identified by the diff, in sorted order.
    pub orphans: Vec<String>,
    /// How many entries were actually removed from the store.
    pub deleted: usize,
}

/// Diff store keys against the live set: everything stored but not
/// referenced is an orphan.
///
/// Pure set difference, sorted for stable presentation — no I/O, no
/// side effects. The sentinel never shows up here because
/// [`scan_documents`](crate::scan::scan_documents) pins it into every
/// live set.
#[must_use]
pub fn collect_orphans(store_keys: &BTreeSet<String>, live: &BTreeSet<String>) -> Vec<String> {
    store_keys.difference(live).cloned().collect()
}

/// Automatic-mode collection: diff the store against `live` and delete
/// every orphan in one batch.
///
/// # Errors
///
/// Propagates [`StoreError`] from reading the key snapshot or from the
/// batched delete. A failure before the delete leaves the store
/// untouched; the delete itself persists once, so the store ends up
/// either fully swept or exactly as it was.
pub fn sweep(store: &BlobStore, live: &BTreeSet<String>) -> Result<SweepReport, StoreError> {
    let orphans = collect_orphans(&store.identifiers()?, live);
    let deleted = if orphans.is_empty() {
        0
    } else {
        store.delete_many(&orphans)?
    };
    Ok(SweepReport { orphans, deleted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::SENTINEL_ID;
    use inlay_store::{OsFs, StoreConfig};
    use std::sync::Arc;

    fn keys(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn interactive_is_the_default_mode() {
        assert_eq!(GcMode::default(), GcMode::Interactive);
    }

    #[test]
    fn orphans_are_store_minus_live() {
        let store_keys = keys(&["a", "b", "c", SENTINEL_ID]);
        let live = keys(&["b", SENTINEL_ID]);
        assert_eq!(collect_orphans(&store_keys, &live), vec!["a", "c"]);
    }

    #[test]
    fn no_orphans_when_everything_referenced() {
        let store_keys = keys(&["a", "b"]);
        let live = keys(&["a", "b", "also-dangling-ref"]);
        assert!(collect_orphans(&store_keys, &live).is_empty());
    }

    #[test]
    fn empty_store_yields_no_orphans() {
        assert!(collect_orphans(&BTreeSet::new(), &keys(&["x"])).is_empty());
    }

    #[test]
    fn sweep_deletes_only_orphans() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::open(Arc::new(OsFs), dir.path(), StoreConfig::default()).unwrap();
        let kept = store.insert("data:image/png;base64,a2VlcA==", "n.md").unwrap();
        let gone = store.insert("data:image/png;base64,ZHJvcA==", "n.md").unwrap();

        let live = keys(&[kept.as_str(), SENTINEL_ID]);
        let report = sweep(&store, &live).unwrap();

        assert_eq!(report.orphans, vec![gone.clone()]);
        assert_eq!(report.deleted, 1);
        assert!(store.resolve(&kept).unwrap().is_some());
        assert!(store.resolve(&gone).unwrap().is_none());
    }

    #[test]
    fn sweep_of_clean_store_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = BlobStore::open(Arc::new(OsFs), dir.path(), StoreConfig::default()).unwrap();
        let id = store.insert("data:image/png;base64,aGk=", "n.md").unwrap();

        let report = sweep(&store, &keys(&[id.as_str()])).unwrap();
        assert!(report.orphans.is_empty());
        assert_eq!(report.deleted, 0);
        assert_eq!(store.len().unwrap(), 1);
    }
}
