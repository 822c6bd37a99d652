//! Session-lifetime cache for upstream responses.
//!
//! Keys are explicit `(operation, normalized argument)` pairs rather than an
//! implicit per-function memo, so tests can reset the cache between cases.
//! Entries are never invalidated by time; catalog sizes are tens of items and
//! the source data changes slowly.

use dashmap::DashMap;

use super::record::{MovieDetail, MovieRecord};

/// Cache key: operation name plus its normalized argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    op: &'static str,
    arg: String,
}

impl CacheKey {
    /// Key for an operation that takes no input (trending, default list).
    pub fn bare(op: &'static str) -> Self {
        Self {
            op,
            arg: String::new(),
        }
    }

    /// Key for a query-parameterized operation. The argument is trimmed and
    /// lowercased so `"Dune "` and `"dune"` share an entry.
    pub fn query(op: &'static str, arg: &str) -> Self {
        Self {
            op,
            arg: arg.trim().to_lowercase(),
        }
    }
}

/// In-memory cache of successful catalog results.
#[derive(Default)]
pub struct ResponseCache {
    lists: DashMap<CacheKey, Vec<MovieRecord>>,
    details: DashMap<String, MovieDetail>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, key: &CacheKey) -> Option<Vec<MovieRecord>> {
        self.lists.get(key).map(|entry| entry.value().clone())
    }

    pub fn store_list(&self, key: CacheKey, records: Vec<MovieRecord>) {
        self.lists.insert(key, records);
    }

    pub fn detail(&self, id: &str) -> Option<MovieDetail> {
        self.details.get(id).map(|entry| entry.value().clone())
    }

    pub fn store_detail(&self, id: &str, detail: MovieDetail) {
        self.details.insert(id.to_string(), detail);
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.lists.clear();
        self.details.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty() && self.details.is_empty()
    }
}
