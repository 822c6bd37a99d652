use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::providers::omdb::OMDB_DEFAULT_BASE_URL;
use crate::catalog::providers::tmdb::TMDB_DEFAULT_BASE_URL;
use crate::catalog::RetryPolicy;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub omdb: OmdbConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub reviews: ReviewsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Trending-list provider credentials and endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// API key; may also come from `MARQUEE_TMDB_API_KEY` / `TMDB_API_KEY`.
    /// An empty key is not fatal at startup: the affected operations surface
    /// an operation-scoped configuration error instead.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_tmdb_base_url(),
        }
    }
}

/// Search/detail provider credentials and endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OmdbConfig {
    /// API key; may also come from `MARQUEE_OMDB_API_KEY` / `OMDB_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_omdb_base_url(),
        }
    }
}

/// Retry knobs for upstream calls. The observed source variants disagreed
/// (3 attempts x 2s vs 5 x 5s), so both are configurable with 3 x 2s as the
/// default.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay_secs(),
        }
    }
}

impl CatalogConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_secs(self.retry_delay_secs))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReviewsConfig {
    /// Path of the flat-file review store.
    #[serde(default = "default_reviews_path")]
    pub path: PathBuf,
}

impl Default for ReviewsConfig {
    fn default() -> Self {
        Self {
            path: default_reviews_path(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_tmdb_base_url() -> String {
    TMDB_DEFAULT_BASE_URL.to_string()
}
fn default_omdb_base_url() -> String {
    OMDB_DEFAULT_BASE_URL.to_string()
}
fn default_max_attempts() -> u32 {
    3
}
fn default_retry_delay_secs() -> u64 {
    2
}
fn default_reviews_path() -> PathBuf {
    PathBuf::from("./reviews.json")
}
