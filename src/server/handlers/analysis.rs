//! Analysis endpoint handler

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::debug;

use crate::models::response::{AnalyzeRequest, AnalyzeResponse, ApiResponse};
use crate::services::persona::AnalysisContext;
use crate::state::AppState;
use crate::utils::error::AppError;

/// POST /api/analyze - Analyze a transcript
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let context = AnalysisContext::from_tags(
        request.mentor.as_deref(),
        request.interview_type.as_deref(),
    );
    debug!(
        chars = request.text.len(),
        mentor = %context.mentor,
        interview_type = %context.interview_type,
        "analyze request"
    );

    let output = state.orchestrator().analyze(&request.text, context).await?;
    Ok(Json(ApiResponse::ok(output)))
}
