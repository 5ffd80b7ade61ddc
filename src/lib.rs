//! Interview Coach - Backend Library
//!
//! Forwards interview transcripts and audio to third-party AI services and
//! returns schema-conformant results to the chat UI. It includes:
//! - The response validation and fallback pipeline (`services::analysis`)
//! - Speech-to-text forwarding (`services::transcription`)
//! - The axum HTTP server (`server`)
//! - Configuration, response envelopes and error types

pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

// ============================================================================
// Re-exports
// ============================================================================

pub use models::response::*;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use server::create_router;
pub use services::analysis::{
    AnalysisConfig, AnalysisError, AnalysisMetadata, AnalysisOrchestrator, AnalysisOutcome,
    AnalysisOutput, ResponseNormalizer,
};
pub use services::persona::{AnalysisContext, InterviewType, Mentor};
pub use services::transcription::{AudioUpload, Transcript, TranscriptionService};
pub use state::AppState;
pub use utils::error::{AppError, AppResult};

// ── Core schema ────────────────────────────────────────────────────────
pub use interview_coach_core::analysis::AnalysisResult;
