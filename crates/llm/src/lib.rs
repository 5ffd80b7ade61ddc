//! Interview Coach LLM
//!
//! Provides a unified interface for the upstream AI services:
//! - Chat completions over the OpenAI wire format (OpenRouter, DeepSeek, OpenAI)
//! - Whisper speech-to-text
//!
//! Also includes the HTTP client factory shared by both.

pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;
pub mod whisper;

// Re-export main types
pub use http_client::build_http_client;
pub use openai::OpenAICompatibleProvider;
pub use provider::LlmProvider;
pub use types::*;
pub use whisper::{AudioInput, WhisperClient, WhisperConfig};
