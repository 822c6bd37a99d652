//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which stands up wiremock servers for both
//! upstream providers, a temp-dir review store, and a full [`AppContext`].
//! The [`with_server`] constructor starts Axum on a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use wiremock::MockServer;

use marquee::catalog::CatalogClient;
use marquee::config::Config;
use marquee::reviews::ReviewStore;
use marquee::server::{create_router, AppContext};

/// Test harness wrapping a fully-constructed [`AppContext`] backed by mock
/// upstreams and a temp-dir review store.
pub struct TestHarness {
    pub ctx: AppContext,
    pub tmdb: MockServer,
    pub omdb: MockServer,
    pub store_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new harness with both providers configured against mock
    /// servers. Retries are kept (3 attempts) but with zero delay so
    /// exhaustion tests stay fast.
    pub async fn new() -> Self {
        let mut config = Config::default();
        config.catalog.retry_delay_secs = 0;
        Self::with_config(config).await
    }

    pub async fn with_config(mut config: Config) -> Self {
        let tmdb = MockServer::start().await;
        let omdb = MockServer::start().await;
        let store_dir = tempfile::tempdir().expect("failed to create temp dir");

        config.tmdb.api_key = "tmdb-test-key".to_string();
        config.tmdb.base_url = tmdb.uri();
        config.omdb.api_key = "omdb-test-key".to_string();
        config.omdb.base_url = omdb.uri();
        config.reviews.path = store_dir.path().join("reviews.json");

        let reviews =
            ReviewStore::open(&config.reviews.path).expect("failed to open review store");
        let catalog = CatalogClient::from_config(&config);

        let ctx = AppContext {
            catalog: Arc::new(catalog),
            reviews: Arc::new(reviews),
            config: Arc::new(config),
        };

        Self {
            ctx,
            tmdb,
            omdb,
            store_dir,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new().await;
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

/// A canned TMDB trending payload with a single well-known result.
pub fn dune_trending_body() -> serde_json::Value {
    serde_json::json!({
        "results": [
            {
                "title": "Dune",
                "release_date": "2021-09-15",
                "poster_path": "/abc.jpg",
                "id": 438631
            }
        ]
    })
}

/// A canned OMDb search payload.
pub fn omdb_search_body() -> serde_json::Value {
    serde_json::json!({
        "Response": "True",
        "Search": [
            {
                "Title": "Movie 43",
                "Year": "2013",
                "Poster": "https://m.media-amazon.com/images/movie43.jpg",
                "imdbID": "tt1333125"
            },
            {
                "Title": "Scary Movie",
                "Year": "2000",
                "Poster": "N/A",
                "imdbID": "tt0175142"
            }
        ]
    })
}
