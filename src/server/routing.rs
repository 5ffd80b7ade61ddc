//! Axum router configuration for all endpoints

use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::server::handlers::{analysis, health, transcription};
use crate::state::AppState;

/// Room for multipart framing and small text fields on top of the audio.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the main application router
///
/// Unmatched paths are served from `static_dir` when one is given.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let upload_limit = state.transcription().max_bytes() + MULTIPART_OVERHEAD_BYTES;

    let router = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/analyze", post(analysis::analyze))
        .route(
            "/api/transcribe",
            post(transcription::transcribe).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}
