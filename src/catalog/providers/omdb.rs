//! OMDb search/detail provider.
//!
//! One endpoint, two query modes: `s=<query>` for title search and `i=<id>`
//! for per-title detail. The wire shape uses PascalCase field names and a
//! `Response` flag of `"True"`/`"False"`; a `"False"` search answer is a
//! semantic no-match, not an error.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use super::urlencoded;
use crate::catalog::error::CatalogError;
use crate::catalog::record::{
    normalize_year, omdb_poster, MovieDetail, MovieRecord, NOT_AVAILABLE,
};
use crate::catalog::transport::Fetch;

const PROVIDER: &str = "OMDb";

pub const OMDB_DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";

// ---------------------------------------------------------------------------
// OMDb API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Search")]
    search: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
}

// ---------------------------------------------------------------------------
// Provider implementation
// ---------------------------------------------------------------------------

/// Search/detail provider backed by the OMDb API.
pub struct OmdbProvider {
    fetch: Arc<dyn Fetch>,
    api_key: String,
    base_url: String,
}

impl OmdbProvider {
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

    fn url(&self, param: &str, value: &str) -> String {
        format!(
            "{}/?{}={}&apikey={}",
            self.base_url,
            param,
            urlencoded(value),
            self.api_key
        )
    }

    async fn get(&self, param: &str, value: &str) -> Result<serde_json::Value, CatalogError> {
        if !self.is_available() {
            return Err(CatalogError::NotConfigured { provider: PROVIDER });
        }
        self.fetch
            .get_json(&self.url(param, value))
            .await
            .map_err(|e| CatalogError::from_fetch(PROVIDER, e))
    }

    /// Search by title. A `Response: "False"` answer yields an empty list
    /// rather than an error; ids come back in the native `tt...` space.
    pub async fn search(&self, query: &str) -> Result<Vec<MovieRecord>, CatalogError> {
        debug!(provider = PROVIDER, query, "searching movies");
        let value = self.get("s", query).await?;

        let body: SearchResponse =
            serde_json::from_value(value).map_err(|e| CatalogError::Malformed {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        if body.response.as_deref() != Some("True") {
            debug!(provider = PROVIDER, query, "no matches");
            return Ok(Vec::new());
        }

        Ok(body
            .search
            .unwrap_or_default()
            .into_iter()
            .map(|m| MovieRecord {
                title: m.title.unwrap_or_default(),
                year: normalize_year(m.year.as_deref()),
                poster_url: omdb_poster(m.poster.as_deref()),
                id: m.imdb_id.unwrap_or_default(),
            })
            .collect())
    }

    /// Fetch plot and rating for a native `tt`-style id.
    ///
    /// A `Response: "False"` answer (unknown id) degrades to
    /// [`MovieDetail::unavailable`]; transport failures are returned so the
    /// caller's retry policy can have a go before it, too, degrades.
    pub async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        debug!(provider = PROVIDER, imdb_id, "fetching movie detail");
        let value = self.get("i", imdb_id).await?;

        let body: DetailResponse =
            serde_json::from_value(value).map_err(|e| CatalogError::Malformed {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        if body.response.as_deref() != Some("True") {
            return Ok(MovieDetail::unavailable());
        }

        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Ok(MovieDetail {
            plot: non_empty(body.plot).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            rating: non_empty(body.imdb_rating).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::transport::FetchError;
    use async_trait::async_trait;

    struct StaticFetch(serde_json::Value);

    #[async_trait]
    impl Fetch for StaticFetch {
        async fn get_json(&self, _url: &str) -> Result<serde_json::Value, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn provider(body: serde_json::Value) -> OmdbProvider {
        OmdbProvider::new(
            Arc::new(StaticFetch(body)),
            "omdb-key".into(),
            OMDB_DEFAULT_BASE_URL.into(),
        )
    }

    #[test]
    fn url_encodes_query_values() {
        let p = provider(serde_json::json!({}));
        assert_eq!(
            p.url("s", "blade runner"),
            "https://www.omdbapi.com/?s=blade+runner&apikey=omdb-key"
        );
        assert_eq!(
            p.url("i", "tt1160419"),
            "https://www.omdbapi.com/?i=tt1160419&apikey=omdb-key"
        );
    }

    #[tokio::test]
    async fn search_maps_native_shape() {
        let p = provider(serde_json::json!({
            "Response": "True",
            "Search": [
                {"Title": "Dune", "Year": "2021", "Poster": "https://img/dune.jpg", "imdbID": "tt1160419"},
                {"Title": "Dune", "Year": "N/A", "Poster": "N/A", "imdbID": "tt0087182"},
            ]
        }));

        let records = p.search("dune").await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "tt1160419");
        assert_eq!(records[0].poster_url, "https://img/dune.jpg");
        assert_eq!(records[1].year, "N/A");
        assert_eq!(
            records[1].poster_url,
            crate::catalog::record::POSTER_PLACEHOLDER
        );
        assert!(records.iter().all(|r| r.is_detailable()));
    }

    #[tokio::test]
    async fn search_no_match_is_empty_not_error() {
        let p = provider(serde_json::json!({"Response": "False", "Error": "Movie not found!"}));
        let records = p.search("zzzznotamovie").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn detail_maps_plot_and_rating() {
        let p = provider(serde_json::json!({
            "Response": "True",
            "Plot": "A mythic hero's journey.",
            "imdbRating": "8.0"
        }));
        let detail = p.detail("tt1160419").await.unwrap();
        assert_eq!(detail.plot, "A mythic hero's journey.");
        assert_eq!(detail.rating, "8.0");
    }

    #[tokio::test]
    async fn detail_unknown_id_degrades_to_unavailable() {
        let p = provider(serde_json::json!({"Response": "False", "Error": "Incorrect IMDb ID."}));
        assert_eq!(
            p.detail("tt0000000").await.unwrap(),
            MovieDetail::unavailable()
        );
    }

    #[tokio::test]
    async fn detail_empty_fields_become_not_available() {
        let p = provider(serde_json::json!({"Response": "True", "Plot": ""}));
        assert_eq!(p.detail("tt1").await.unwrap(), MovieDetail::unavailable());
    }
}
