use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::gemini::GeminiClient;
use crate::generator::ImageGenerator;
use crate::summarizer::QuerySummarizer;
use crate::unsplash::UnsplashClient;
use crate::visual_search::VisualSearch;

pub mod handlers;
pub mod models;

/// Everything a request handler needs, built once at startup. Components
/// take their upstream clients by injection so tests can substitute fakes.
pub struct AppState {
    pub visual_search: VisualSearch,
    pub generator: ImageGenerator,
    pub unsplash: UnsplashClient,
}

impl AppState {
    pub fn new(gemini: Option<GeminiClient>, unsplash: UnsplashClient) -> Self {
        Self {
            visual_search: VisualSearch::new(
                QuerySummarizer::new(gemini.clone()),
                unsplash.clone(),
            ),
            generator: ImageGenerator::new(gemini),
            unsplash,
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration: the front-end is served from a separate origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health_handler))
        .route("/api/visual-search", post(handlers::visual_search_handler))
        .route("/api/generate-content", post(handlers::generate_content_handler))
        .route("/api/track-download", post(handlers::track_download_handler))
        .with_state(state)
        .layer(cors)
}
