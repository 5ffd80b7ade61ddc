//! Application State
//!
//! Shared state handed to every HTTP handler. Both services are built once
//! at startup from `AppConfig`; handlers only borrow them.

use std::sync::Arc;

use tracing::info;

use crate::models::settings::AppConfig;
use crate::services::analysis::AnalysisOrchestrator;
use crate::services::transcription::TranscriptionService;
use crate::utils::error::AppResult;

/// Application state shared by the axum router
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<AnalysisOrchestrator>,
    transcription: Arc<TranscriptionService>,
}

impl AppState {
    /// Create state from already-built services
    pub fn new(orchestrator: AnalysisOrchestrator, transcription: TranscriptionService) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            transcription: Arc::new(transcription),
        }
    }

    /// Build both services from the application configuration
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let orchestrator = AnalysisOrchestrator::from_provider_config(
            config.provider_config()?,
            config.analysis_config(),
        )?;
        let transcription =
            TranscriptionService::from_config(config.whisper_config()?, config.max_upload_bytes)?;

        info!(
            analysis_live = orchestrator.is_live(),
            transcription_live = transcription.is_live(),
            "services initialized"
        );
        Ok(Self::new(orchestrator, transcription))
    }

    pub fn orchestrator(&self) -> &AnalysisOrchestrator {
        &self.orchestrator
    }

    pub fn transcription(&self) -> &TranscriptionService {
        &self.transcription
    }
}
