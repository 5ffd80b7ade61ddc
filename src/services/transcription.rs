//! Transcription Service
//!
//! Validates uploaded audio and forwards it to Whisper. Without usable
//! credentials, or when the upstream call fails, a fixed demo transcript is
//! returned instead; upstream errors are logged and never surfaced.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use interview_coach_llm::{
    AudioInput, LlmResult, TranscriptSegment, Transcription, WhisperClient, WhisperConfig,
};

/// Largest upload Whisper accepts (25 MiB).
pub const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

const ACCEPTED_NON_AUDIO_TYPES: &[&str] = &["application/octet-stream", "video/webm"];

/// Caller errors for an upload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscriptionError {
    #[error("No audio data received")]
    EmptyAudio,

    #[error("Audio file is {size} bytes, the limit is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported audio content type: {0}")]
    UnsupportedContentType(String),
}

/// One uploaded audio file.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Transcript returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    pub segments: Vec<TranscriptSegment>,
    pub demo_mode: bool,
}

impl From<Transcription> for Transcript {
    fn from(t: Transcription) -> Self {
        Self {
            text: t.text,
            language: t.language,
            duration_secs: t.duration_secs,
            segments: t.segments,
            demo_mode: false,
        }
    }
}

const DEMO_LINES: &[(f64, f64, &str)] = &[
    (0.0, 6.5, "Interviewer: Thanks for joining. Can you walk me through a recent project you are proud of?"),
    (6.5, 21.0, "Candidate: Sure. At my last company I led the rebuild of our order processing service in Rust, moving it from a monolith to microservices running on Kubernetes."),
    (21.0, 33.5, "Candidate: We used Kafka for events and PostgreSQL for storage, and we practiced TDD with CI/CD so every change shipped behind automated tests."),
    (33.5, 39.0, "Interviewer: What was the hardest trade-off you had to make?"),
    (39.0, 55.0, "Candidate: Choosing eventual consistency for inventory counts. It cut checkout latency by forty percent, but we had to build reconciliation jobs and explain the trade-off to the product team."),
];

/// Fixed transcript used when Whisper is unavailable. Long enough to be
/// analyzed.
pub fn demo_transcript() -> Transcript {
    let segments: Vec<TranscriptSegment> = DEMO_LINES
        .iter()
        .map(|(start, end, text)| TranscriptSegment {
            start: *start,
            end: *end,
            text: text.to_string(),
        })
        .collect();
    Transcript {
        text: segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
        language: Some("english".to_string()),
        duration_secs: segments.last().map(|s| s.end),
        segments,
        demo_mode: true,
    }
}

/// Base MIME type without parameters, lowercased.
fn base_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

/// Speech-to-text service
pub struct TranscriptionService {
    client: Option<WhisperClient>,
    max_bytes: usize,
}

impl TranscriptionService {
    /// Create a service over an explicit client. `None` means demo mode.
    pub fn new(client: Option<WhisperClient>, max_bytes: usize) -> Self {
        Self { client, max_bytes }
    }

    /// Create a service from Whisper credentials. A missing or placeholder
    /// key selects demo mode.
    pub fn from_config(config: WhisperConfig, max_bytes: usize) -> LlmResult<Self> {
        if !config.has_usable_api_key() {
            info!("transcription API key not configured, serving demo transcripts");
            return Ok(Self::new(None, max_bytes));
        }
        Ok(Self::new(Some(WhisperClient::new(config)?), max_bytes))
    }

    /// Whether uploads go to a real upstream.
    pub fn is_live(&self) -> bool {
        self.client.is_some()
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Check an upload before anything is sent upstream.
    pub fn validate(&self, upload: &AudioUpload) -> Result<(), TranscriptionError> {
        if upload.bytes.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(TranscriptionError::TooLarge {
                size: upload.bytes.len(),
                max: self.max_bytes,
            });
        }
        let content_type = base_content_type(&upload.content_type);
        let accepted = content_type.is_empty()
            || content_type.starts_with("audio/")
            || ACCEPTED_NON_AUDIO_TYPES.contains(&content_type.as_str());
        if !accepted {
            return Err(TranscriptionError::UnsupportedContentType(
                upload.content_type.clone(),
            ));
        }
        Ok(())
    }

    /// Transcribe an upload. Only validation failures are returned as `Err`.
    pub async fn transcribe(
        &self,
        upload: &AudioUpload,
        language: Option<&str>,
    ) -> Result<Transcript, TranscriptionError> {
        self.validate(upload)?;

        let Some(client) = &self.client else {
            info!(bytes = upload.bytes.len(), "no credentials, returning demo transcript");
            return Ok(demo_transcript());
        };

        let content_type = base_content_type(&upload.content_type);
        let input = AudioInput {
            bytes: &upload.bytes,
            file_name: &upload.file_name,
            content_type: if content_type.is_empty() {
                "application/octet-stream"
            } else {
                content_type.as_str()
            },
            language,
        };

        match client.transcribe(input).await {
            Ok(transcription) => {
                info!(
                    chars = transcription.text.len(),
                    segments = transcription.segments.len(),
                    "transcription complete"
                );
                Ok(transcription.into())
            }
            Err(e) => {
                warn!(error = %e, "transcription failed, returning demo transcript");
                Ok(demo_transcript())
            }
        }
    }
}
