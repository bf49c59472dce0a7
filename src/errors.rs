use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Client-input rejections, the only non-success responses this service
/// produces. Upstream failures never reach this type; they degrade to
/// empty/default payloads inside the components.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("query key missing or empty in request body")]
    MissingQuery,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // Keep the results key so the front-end can render the empty state.
            ApiError::EmptyQuery => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "results": [],
                    "message": "Mochi needs to know what to look for!",
                }),
            ),
            ApiError::MissingQuery => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": "Query key missing or empty in request body",
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
