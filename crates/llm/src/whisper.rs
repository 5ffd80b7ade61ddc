//! Whisper Speech-to-Text Client
//!
//! Posts audio bytes to the OpenAI `audio/transcriptions` endpoint as
//! multipart form data and decodes the `verbose_json` reply into a
//! [`Transcription`] with per-segment timestamps.

use std::time::Duration;

use reqwest::multipart;
use serde::{Deserialize, Serialize};
use tracing::debug;

use interview_coach_core::proxy::ProxyConfig;

use crate::http_client::build_http_client;
use crate::provider::{missing_api_key_error, parse_http_error};
use crate::types::{
    is_placeholder_api_key, LlmError, LlmResult, TranscriptSegment, Transcription,
};

/// Default OpenAI Whisper transcription endpoint
pub const WHISPER_API_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Configuration for the Whisper client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperConfig {
    /// API key. Never serialized.
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    /// Full endpoint URL override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Whisper model identifier
    pub model: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Optional outbound proxy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

impl Default for WhisperConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: "whisper-1".to_string(),
            request_timeout_secs: 120,
            proxy: None,
        }
    }
}

impl WhisperConfig {
    /// Whether a real (non-placeholder) API key is configured.
    pub fn has_usable_api_key(&self) -> bool {
        !is_placeholder_api_key(self.api_key.as_deref())
    }

    /// Endpoint URL, falling back to the public Whisper API.
    pub fn endpoint(&self) -> &str {
        self.base_url.as_deref().unwrap_or(WHISPER_API_URL)
    }
}

/// Audio payload handed to the client.
#[derive(Debug, Clone)]
pub struct AudioInput<'a> {
    pub bytes: &'a [u8],
    pub file_name: &'a str,
    pub content_type: &'a str,
    /// Optional ISO-639-1 language hint such as `"en"`
    pub language: Option<&'a str>,
}

/// Whisper API client
pub struct WhisperClient {
    config: WhisperConfig,
    client: reqwest::Client,
}

impl WhisperClient {
    /// Create a new client with the given configuration
    pub fn new(config: WhisperConfig) -> LlmResult<Self> {
        let client = build_http_client(
            config.proxy.as_ref(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self { config, client })
    }

    /// Get the configuration for this client.
    pub fn config(&self) -> &WhisperConfig {
        &self.config
    }

    /// Transcribe one audio file.
    pub async fn transcribe(&self, audio: AudioInput<'_>) -> LlmResult<Transcription> {
        if !self.config.has_usable_api_key() {
            return Err(missing_api_key_error("whisper"));
        }
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        debug!(
            url = self.config.endpoint(),
            model = %self.config.model,
            audio_bytes = audio.bytes.len(),
            "sending transcription request"
        );

        let file_part = multipart::Part::bytes(audio.bytes.to_vec())
            .file_name(audio.file_name.to_string())
            .mime_str(audio.content_type)
            .map_err(|e| LlmError::InvalidRequest {
                message: format!("invalid audio content type {}: {}", audio.content_type, e),
            })?;

        let mut form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.config.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment");
        if let Some(language) = audio.language {
            form = form.text("language", language.to_string());
        }

        let response = self
            .client
            .post(self.config.endpoint())
            .header("Authorization", format!("Bearer {}", api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| LlmError::from_transport(&e))?;

        let status = response.status().as_u16();
        let body_text = response
            .text()
            .await
            .map_err(|e| LlmError::from_transport(&e))?;

        if !(200..300).contains(&status) {
            return Err(parse_http_error(status, &body_text, "whisper"));
        }

        let transcription = parse_whisper_response(&body_text)?;
        debug!(chars = transcription.text.len(), "transcription complete");
        Ok(transcription)
    }
}

#[derive(Debug, Deserialize)]
struct WhisperResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    segments: Vec<WhisperSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    start: f64,
    end: f64,
    text: String,
}

fn parse_whisper_response(body: &str) -> LlmResult<Transcription> {
    let response: WhisperResponse = serde_json::from_str(body).map_err(|e| LlmError::ParseError {
        message: format!("Failed to parse transcription: {}", e),
    })?;

    Ok(Transcription {
        text: response.text.trim().to_string(),
        language: response.language,
        duration_secs: response.duration,
        segments: response
            .segments
            .into_iter()
            .map(|s| TranscriptSegment {
                start: s.start,
                end: s.end,
                text: s.text.trim().to_string(),
            })
            .collect(),
    })
}
