//! Movie catalog aggregation.
//!
//! The [`CatalogClient`] normalizes two upstream metadata providers (a
//! trending-list provider and a search/detail provider) into one
//! [`MovieRecord`] shape, applies a bounded fixed-delay [`RetryPolicy`] to
//! transient network failures, and caches successful results per distinct
//! query for the lifetime of the process.
//!
//! # Module layout
//!
//! - [`record`] -- Normalized record types and field-mapping rules.
//! - [`providers`] -- Concrete TMDB / OMDb provider implementations.
//! - [`transport`] -- Injectable HTTP seam ([`Fetch`]).
//! - [`retry`] -- Bounded-retry policy with a retryable-error predicate.
//! - [`cache`] -- Explicit `(operation, argument)` response cache.
//! - [`error`] -- The catalog error taxonomy.

pub mod cache;
pub mod error;
pub mod providers;
pub mod record;
pub mod retry;
pub mod transport;

use std::sync::Arc;

use tracing::warn;

use crate::config::Config;

pub use cache::{CacheKey, ResponseCache};
pub use error::CatalogError;
pub use providers::{OmdbProvider, TmdbProvider};
pub use record::{is_detailable_id, MovieDetail, MovieRecord, IMDB_ID_PREFIX, POSTER_PLACEHOLDER};
pub use retry::RetryPolicy;
pub use transport::{Fetch, FetchError, HttpFetch};

/// Default-list query sent to the search provider when trending is empty.
const DEFAULT_QUERY: &str = "movie";

/// Client aggregating both upstream providers behind one normalized surface.
pub struct CatalogClient {
    tmdb: TmdbProvider,
    omdb: OmdbProvider,
    retry: RetryPolicy,
    cache: ResponseCache,
}

impl CatalogClient {
    pub fn new(tmdb: TmdbProvider, omdb: OmdbProvider, retry: RetryPolicy) -> Self {
        Self {
            tmdb,
            omdb,
            retry,
            cache: ResponseCache::new(),
        }
    }

    /// Build a client from application config, sharing one HTTP transport
    /// between both providers.
    pub fn from_config(config: &Config) -> Self {
        let fetch: Arc<dyn Fetch> = Arc::new(HttpFetch::new());
        let tmdb = TmdbProvider::new(
            Arc::clone(&fetch),
            config.tmdb.api_key.clone(),
            config.tmdb.base_url.clone(),
        );
        let omdb = OmdbProvider::new(
            fetch,
            config.omdb.api_key.clone(),
            config.omdb.base_url.clone(),
        );
        Self::new(tmdb, omdb, config.catalog.retry_policy())
    }

    /// The response cache, exposed so tests can reset it between cases.
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// This week's trending movies from the trending-list provider.
    pub async fn fetch_trending(&self) -> Result<Vec<MovieRecord>, CatalogError> {
        let key = CacheKey::bare("trending");
        if let Some(hit) = self.cache.list(&key) {
            return Ok(hit);
        }

        let records = self
            .retry
            .run("fetch_trending", || self.tmdb.trending())
            .await?;
        self.cache.store_list(key, records.clone());
        Ok(records)
    }

    /// Generic default list from the search provider, used as a fallback
    /// when trending yields nothing.
    pub async fn fetch_default(&self) -> Result<Vec<MovieRecord>, CatalogError> {
        let key = CacheKey::bare("default");
        if let Some(hit) = self.cache.list(&key) {
            return Ok(hit);
        }

        let records = self
            .retry
            .run("fetch_default", || self.omdb.search(DEFAULT_QUERY))
            .await?;
        self.cache.store_list(key, records.clone());
        Ok(records)
    }

    /// Title search against the search provider. No-match yields an empty
    /// list, not an error.
    pub async fn search(&self, query: &str) -> Result<Vec<MovieRecord>, CatalogError> {
        let query = query.trim();
        let key = CacheKey::query("search", query);
        if let Some(hit) = self.cache.list(&key) {
            return Ok(hit);
        }

        let records = self.retry.run("search", || self.omdb.search(query)).await?;
        self.cache.store_list(key, records.clone());
        Ok(records)
    }

    /// Best-effort plot/rating lookup for a native `tt`-style id.
    ///
    /// Never fails: after the retry budget is spent, any remaining error
    /// degrades to [`MovieDetail::unavailable`] so detail lookup can never
    /// block catalog display. Callers are expected to gate on
    /// [`MovieRecord::is_detailable`]; trending-provider ids never reach
    /// this method in the composed flow.
    pub async fn fetch_detail(&self, id: &str) -> MovieDetail {
        if let Some(hit) = self.cache.detail(id) {
            return hit;
        }

        match self.retry.run("fetch_detail", || self.omdb.detail(id)).await {
            Ok(detail) => {
                self.cache.store_detail(id, detail.clone());
                detail
            }
            Err(e) => {
                warn!(id, error = %e, "detail lookup failed, degrading to N/A");
                MovieDetail::unavailable()
            }
        }
    }
}
