use axum::{Json, extract::State};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::generator::GeneratedImage;

use super::AppState;
use super::models::{HealthResponse, SearchRequest, SearchResponse, TrackRequest, TrackResponse};

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online",
        message: "Mochi is awake and listening!",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// Bodies are extracted as Option so a missing or malformed payload reads as
// an empty query instead of a framework-level rejection.
pub async fn visual_search_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SearchRequest>>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = body.map(|Json(b)| b.query).unwrap_or_default();
    let query = query.trim();

    if query.is_empty() {
        return Err(ApiError::EmptyQuery);
    }

    let results = state.visual_search.search(query).await;
    Ok(Json(SearchResponse { results }))
}

pub async fn generate_content_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SearchRequest>>,
) -> Result<Json<GeneratedImage>, ApiError> {
    let query = body.map(|Json(b)| b.query).unwrap_or_default();
    let query = query.trim();

    if query.is_empty() {
        return Err(ApiError::MissingQuery);
    }

    Ok(Json(state.generator.generate(query).await))
}

// Always 200: tracking is a reporting obligation toward the photo API, and
// its outcome must never break the client's selection flow.
pub async fn track_download_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<TrackRequest>>,
) -> Json<TrackResponse> {
    let url = body
        .and_then(|Json(b)| b.download_location)
        .unwrap_or_default();

    if url.is_empty() {
        return Json(TrackResponse { status: "ignored" });
    }

    state.unsplash.track_download(&url).await;
    Json(TrackResponse { status: "success" })
}
