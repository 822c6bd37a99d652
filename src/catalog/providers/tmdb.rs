//! TMDB (The Movie Database) trending-list provider.
//!
//! Queries the weekly trending endpoint of the TMDB v3 REST API and maps the
//! response into normalized [`MovieRecord`]s. Ids are prefixed `tmdb_` so
//! they cannot collide with the search provider's native identifiers.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::catalog::error::CatalogError;
use crate::catalog::record::{normalize_year, tmdb_poster, MovieRecord, TMDB_ID_PREFIX};
use crate::catalog::transport::Fetch;

const PROVIDER: &str = "TMDB";

pub const TMDB_DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TrendingResponse {
    results: Option<Vec<TrendingMovie>>,
}

#[derive(Debug, Deserialize)]
struct TrendingMovie {
    id: u64,
    title: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// Trending-list provider backed by the TMDB v3 API.
pub struct TmdbProvider {
    fetch: Arc<dyn Fetch>,
    api_key: String,
    base_url: String,
}

impl TmdbProvider {
    pub fn new(fetch: Arc<dyn Fetch>, api_key: String, base_url: String) -> Self {
        Self {
            fetch,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Whether an API key has been configured.
    pub fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}?api_key={}", self.base_url, path, self.api_key)
    }

    /// Fetch this week's trending movies, normalized.
    ///
    /// Terminal failures: missing API key, HTTP 401, a response without a
    /// `results` array. Connection-level faults surface as transient
    /// [`CatalogError::Network`] for the retry policy to handle.
    pub async fn trending(&self) -> Result<Vec<MovieRecord>, CatalogError> {
        if !self.is_available() {
            return Err(CatalogError::NotConfigured { provider: PROVIDER });
        }

        debug!(provider = PROVIDER, "fetching weekly trending movies");
        let value = self
            .fetch
            .get_json(&self.url("/trending/movie/week"))
            .await
            .map_err(|e| CatalogError::from_fetch(PROVIDER, e))?;

        let body: TrendingResponse =
            serde_json::from_value(value).map_err(|e| CatalogError::Malformed {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let results = body
            .results
            .ok_or(CatalogError::NoResults { provider: PROVIDER })?;

        Ok(results
            .into_iter()
            .map(|m| MovieRecord {
                title: m.title.unwrap_or_default(),
                year: normalize_year(m.release_date.as_deref()),
                poster_url: tmdb_poster(m.poster_path.as_deref()),
                id: format!("{TMDB_ID_PREFIX}{}", m.id),
            })
            .collect())
    }
}
