use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{is_detailable_id, CatalogError, MovieDetail, MovieRecord};
use crate::reviews::ReviewError;
use crate::server::AppContext;

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/search", get(search_movies))
        .route("/movies/:id/detail", get(movie_detail))
        .route("/movies/:id/reviews", get(list_reviews).post(submit_review))
}

/// Movie list envelope. Upstream failures keep the status 200: the list is
/// empty and `notice` carries the user-visible message.
#[derive(Serialize)]
struct MovieListResponse {
    movies: Vec<MovieRecord>,
    notice: Option<String>,
}

#[derive(Serialize)]
struct ReviewListResponse {
    comments: Vec<String>,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
}

/// Configuration-class failures (missing or rejected key) need operator
/// action and are logged at error level; everything else is routine.
fn log_catalog_failure(op: &'static str, e: &CatalogError) {
    if e.is_configuration() {
        tracing::error!(op, error = %e, "catalog provider is misconfigured");
    } else {
        tracing::warn!(op, error = %e, "catalog operation failed");
    }
}

async fn list_movies(State(ctx): State<AppContext>) -> Json<MovieListResponse> {
    let mut notice = None;

    let movies = match ctx.catalog.fetch_trending().await {
        Ok(movies) if !movies.is_empty() => movies,
        Ok(_) => {
            tracing::info!("trending list is empty, falling back to default list");
            default_movies(&ctx, &mut notice).await
        }
        Err(e) => {
            log_catalog_failure("fetch_trending", &e);
            notice = Some(e.to_string());
            default_movies(&ctx, &mut notice).await
        }
    };

    // Every displayed id gets a store entry before its comments are read.
    if let Err(e) = ctx.reviews.ensure_ids(movies.iter().map(|m| m.id.as_str())) {
        tracing::warn!(error = %e, "failed to ensure review entries");
    }

    Json(MovieListResponse { movies, notice })
}

/// Fallback list from the search provider. Keeps an earlier trending notice
/// when the fallback succeeds; replaces it when the fallback fails too.
async fn default_movies(ctx: &AppContext, notice: &mut Option<String>) -> Vec<MovieRecord> {
    match ctx.catalog.fetch_default().await {
        Ok(movies) if !movies.is_empty() => movies,
        Ok(_) => {
            *notice = Some("Failed to load movies. Please try again.".to_string());
            Vec::new()
        }
        Err(e) => {
            log_catalog_failure("fetch_default", &e);
            *notice = Some(e.to_string());
            Vec::new()
        }
    }
}

#[derive(Deserialize)]
struct SearchParams {
    query: Option<String>,
}

async fn search_movies(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MovieListResponse>, ApiError> {
    let query = params.query.as_deref().unwrap_or("").trim().to_string();
    if query.is_empty() {
        return Err(bad_request("Query parameter is required"));
    }

    let (movies, notice) = match ctx.catalog.search(&query).await {
        Ok(movies) if !movies.is_empty() => (movies, None),
        Ok(_) => (
            Vec::new(),
            Some("No movies found for your search.".to_string()),
        ),
        Err(e) => {
            log_catalog_failure("search", &e);
            (Vec::new(), Some(e.to_string()))
        }
    };

    if let Err(e) = ctx.reviews.ensure_ids(movies.iter().map(|m| m.id.as_str())) {
        tracing::warn!(error = %e, "failed to ensure review entries");
    }

    Ok(Json(MovieListResponse { movies, notice }))
}

/// Best-effort detail. Only ids in the search provider's native `tt` space
/// get a lookup; trending-provider ids answer `N/A` without any upstream
/// call.
async fn movie_detail(State(ctx): State<AppContext>, Path(id): Path<String>) -> Json<MovieDetail> {
    if !is_detailable_id(&id) {
        return Json(MovieDetail::unavailable());
    }
    Json(ctx.catalog.fetch_detail(&id).await)
}

async fn list_reviews(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Json<ReviewListResponse> {
    Json(ReviewListResponse {
        comments: ctx.reviews.comments(&id),
    })
}

#[derive(Deserialize)]
struct SubmitReviewRequest {
    text: String,
}

async fn submit_review(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<(StatusCode, Json<ReviewListResponse>), ApiError> {
    match ctx.reviews.submit(&id, &payload.text) {
        Ok(comments) => Ok((StatusCode::CREATED, Json(ReviewListResponse { comments }))),
        Err(ReviewError::EmptyComment) => Err(bad_request("Please enter a review.")),
        Err(e) => {
            tracing::error!(id, error = %e, "failed to persist review");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            ))
        }
    }
}
