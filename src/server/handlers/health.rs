//! Health endpoint handler

use axum::extract::State;
use axum::Json;

use crate::models::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health - Liveness plus upstream configuration status
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        analysis_configured: state.orchestrator().is_live(),
        transcription_configured: state.transcription().is_live(),
        ..HealthResponse::default()
    })
}
