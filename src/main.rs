use std::sync::Arc;

use mochi::api::{self, AppState};
use mochi::config::CONFIG;
use mochi::gemini::GeminiClient;
use mochi::unsplash::UnsplashClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    CONFIG.warn_missing();

    let gemini = CONFIG.gemini_api_key.clone().map(GeminiClient::new);
    if gemini.is_some() {
        log::info!("Mochi's backend brain initialized");
    }
    let unsplash = UnsplashClient::new(CONFIG.unsplash_access_key.clone());

    let state = Arc::new(AppState::new(gemini, unsplash));
    let router = api::create_router(state);

    let addr = format!("0.0.0.0:{}", CONFIG.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Mochi backend listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}
