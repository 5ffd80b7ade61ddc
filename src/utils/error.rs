//! Error Handling
//!
//! Unified error types for the application.
//! Uses thiserror for ergonomic error definitions; `AppError` is also the
//! rejection type of every HTTP handler.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use interview_coach_core::CoreError;
use interview_coach_llm::LlmError;

use crate::models::response::ApiResponse;
use crate::services::analysis::AnalysisError;
use crate::services::transcription::TranscriptionError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors from the core crate
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Upstream client construction errors
    #[error("Upstream client error: {0}")]
    Llm(#[from] LlmError),

    /// Malformed request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Well-formed request the services refuse
    #[error("{0}")]
    InvalidInput(String),

    /// Upload over the size limit
    #[error("{0}")]
    PayloadTooLarge(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Config(_) | AppError::Core(_) | AppError::Llm(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidInput { .. } => AppError::InvalidInput(err.to_string()),
        }
    }
}

impl From<TranscriptionError> for AppError {
    fn from(err: TranscriptionError) -> Self {
        match err {
            TranscriptionError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            TranscriptionError::EmptyAudio | TranscriptionError::UnsupportedContentType(_) => {
                AppError::InvalidInput(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(ApiResponse::<()>::err(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::config("PORT must be a number");
        assert_eq!(err.to_string(), "Configuration error: PORT must be a number");
    }

    #[test]
    fn test_analysis_error_maps_to_bad_request() {
        let err: AppError = AnalysisError::InvalidInput {
            required: 50,
            actual: 3,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("at least 50"));
    }

    #[test]
    fn test_transcription_error_status_codes() {
        let too_large: AppError = TranscriptionError::TooLarge { size: 2, max: 1 }.into();
        assert_eq!(too_large.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        let empty: AppError = TranscriptionError::EmptyAudio.into();
        assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_errors() {
        assert_eq!(
            AppError::config("bad proxy").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
