//! Response Types
//!
//! Standard JSON envelopes and request bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::services::analysis::AnalysisOutput;

/// Generic response envelope for every API route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response with message
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}


/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
    /// Whether analysis calls reach a real upstream
    pub analysis_configured: bool,
    /// Whether transcription calls reach a real upstream
    pub transcription_configured: bool,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            service: "interview-coach".to_string(),
            analysis_configured: false,
            transcription_configured: false,
        }
    }
}

/// Body of `POST /api/analyze`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Transcript text
    #[serde(alias = "transcript")]
    pub text: String,
    #[serde(default)]
    pub mentor: Option<String>,
    #[serde(default, alias = "interview_type")]
    pub interview_type: Option<String>,
}

/// Data of a successful `POST /api/analyze`
pub type AnalyzeResponse = AnalysisOutput;
