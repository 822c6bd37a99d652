//! Review file primitives: whole-document load and atomic save.
//!
//! The persisted shape is one JSON object mapping movie id to
//! `{ "comments": [string, ...] }`, created as `{}` when absent. Reads are
//! fail-open: a missing or corrupt file degrades to "no reviews yet" rather
//! than blocking anything. Writes go through a temp file in the same
//! directory and an atomic rename, so a concurrent `load` can never observe
//! a partially written document.
//!
//! These primitives carry the classic lost-update race when two writers
//! interleave load and save; [`super::ReviewStore`] serializes the cycle.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::warn;

/// Ordered comments for one movie id. Insertion order is preserved; there is
/// no deduplication, editing, or deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub comments: Vec<String>,
}

/// The full in-memory mapping, id to entry.
pub type ReviewMap = BTreeMap<String, ReviewEntry>;

/// Error raised by review mutations and persistence.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The submitted text was empty after trimming. Nothing was persisted.
    #[error("review text is empty")]
    EmptyComment,

    /// The store file could not be written. The in-memory mutation that
    /// triggered the save is not lost; the caller may retry.
    #[error("failed to persist reviews to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping could not be serialized.
    #[error("failed to serialize reviews: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Guarantee the mapping contains an entry for `id`. Idempotent; called
/// before every read of a movie's comments so lookups never miss.
pub fn ensure(map: &mut ReviewMap, id: &str) {
    map.entry(id.to_string()).or_default();
}

/// Append `text` to `id`'s comment sequence after trim-validation.
///
/// Blank input is rejected with [`ReviewError::EmptyComment`] and the map is
/// left untouched. The original (untrimmed) text is what gets stored.
pub fn append(map: &mut ReviewMap, id: &str, text: &str) -> Result<(), ReviewError> {
    if text.trim().is_empty() {
        return Err(ReviewError::EmptyComment);
    }
    map.entry(id.to_string())
        .or_default()
        .comments
        .push(text.to_string());
    Ok(())
}

/// Handle to the persisted review document.
pub struct ReviewFile {
    path: PathBuf,
}

impl ReviewFile {
    /// Open the store at `path`, creating it as an empty document when it
    /// does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ReviewError> {
        let file = Self { path: path.into() };
        if !file.path.exists() {
            file.save(&ReviewMap::new())?;
        }
        Ok(file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the entire document. Any read or parse failure degrades to an
    /// empty mapping.
    pub fn load(&self) -> ReviewMap {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read review store, starting empty");
                return ReviewMap::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "review store is corrupt, starting empty");
                ReviewMap::new()
            }
        }
    }

    /// Serialize the whole mapping and atomically replace the store file.
    pub fn save(&self, map: &ReviewMap) -> Result<(), ReviewError> {
        let json = serde_json::to_string_pretty(map)?;

        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let persist_err = |source: std::io::Error| ReviewError::Persist {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(persist_err)?;
        tmp.write_all(json.as_bytes()).map_err(persist_err)?;
        tmp.persist(&self.path)
            .map_err(|e| persist_err(e.error))
            .map(|_| ())
    }
}
