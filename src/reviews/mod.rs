//! Durable public-review board: a flat-file mapping from movie id to an
//! ordered list of free-text comments.
//!
//! [`ReviewStore`] is the guarded surface the rest of the application uses.
//! Every interaction re-reads the document from disk (load on demand, no
//! long-lived snapshot) and rewrites it entirely after a mutation. The
//! load-mutate-save cycle runs under a single-writer mutex, which closes the
//! lost-update race the raw primitives in [`store`] would otherwise permit:
//! two writers both loading before either saves would silently drop one
//! comment.

pub mod store;

use std::path::Path;

use parking_lot::Mutex;

pub use store::{append, ensure, ReviewEntry, ReviewError, ReviewFile, ReviewMap};

/// Shared, single-writer review store.
pub struct ReviewStore {
    file: ReviewFile,
    write_guard: Mutex<()>,
}

impl ReviewStore {
    /// Open the store, creating an empty document when the file is absent.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Result<Self, ReviewError> {
        Ok(Self {
            file: ReviewFile::open(path)?,
            write_guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Snapshot of the full mapping as currently persisted.
    pub fn load(&self) -> ReviewMap {
        self.file.load()
    }

    /// Comments for one movie, oldest first. The entry is ensured in the
    /// loaded snapshot so the lookup cannot miss.
    pub fn comments(&self, id: &str) -> Vec<String> {
        let mut map = self.file.load();
        store::ensure(&mut map, id);
        map.remove(id).unwrap_or_default().comments
    }

    /// Durably create empty entries for every displayed id that does not
    /// have one yet. Ids that already exist are left untouched.
    pub fn ensure_ids<'a, I>(&self, ids: I) -> Result<(), ReviewError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let _guard = self.write_guard.lock();
        let mut map = self.file.load();
        let before = map.len();
        for id in ids {
            store::ensure(&mut map, id);
        }
        if map.len() != before {
            self.file.save(&map)?;
        }
        Ok(())
    }

    /// Append one comment and persist, returning the movie's refreshed
    /// comment list.
    ///
    /// Runs the whole load-mutate-save cycle under the write guard so
    /// concurrent submissions cannot overwrite each other. Validation
    /// failures leave the store untouched; persistence failures surface
    /// without discarding the appended comment (a retry replays the cycle).
    pub fn submit(&self, id: &str, text: &str) -> Result<Vec<String>, ReviewError> {
        let _guard = self.write_guard.lock();
        let mut map = self.file.load();
        store::ensure(&mut map, id);
        store::append(&mut map, id, text)?;
        self.file.save(&map)?;
        Ok(map.remove(id).unwrap_or_default().comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, ReviewStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ReviewStore::open(dir.path().join("reviews.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn submit_then_comments_round_trips() {
        let (_dir, store) = temp_store();
        let comments = store.submit("tt1160419", "Great movie").unwrap();
        assert_eq!(comments, vec!["Great movie"]);
        assert_eq!(store.comments("tt1160419"), vec!["Great movie"]);
    }

    #[test]
    fn blank_submission_changes_nothing_on_disk() {
        let (_dir, store) = temp_store();
        store.submit("tt1", "keep me").unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        assert!(matches!(
            store.submit("tt1", "  \n "),
            Err(ReviewError::EmptyComment)
        ));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn comments_for_unknown_id_is_empty_not_missing() {
        let (_dir, store) = temp_store();
        assert!(store.comments("tmdb_438631").is_empty());
    }

    #[test]
    fn ensure_ids_persists_only_new_entries() {
        let (_dir, store) = temp_store();
        store.submit("tt1", "hello").unwrap();

        store.ensure_ids(["tt1", "tt2", "tmdb_9"]).unwrap();
        let map = store.load();
        assert_eq!(map.len(), 3);
        assert_eq!(map["tt1"].comments, vec!["hello"]);
        assert!(map["tt2"].comments.is_empty());

        // Second run is a no-op.
        let before = std::fs::read_to_string(store.path()).unwrap();
        store.ensure_ids(["tt1", "tt2"]).unwrap();
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }
}
