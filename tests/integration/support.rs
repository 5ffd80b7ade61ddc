//! Test support: a scripted `LlmProvider` that counts calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use interview_coach_llm::{
    LlmError, LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, Message, ProviderConfig,
    StopReason, UsageStats,
};

pub const TRANSCRIPT: &str = "Interviewer: Tell me about a system you scaled. \
    Candidate: At Netflix I moved our recommendations API from Java to Rust, \
    added Redis caching and cut p99 latency in half while practicing TDD.";

pub struct ScriptedProvider {
    config: ProviderConfig,
    script: Mutex<Vec<LlmResult<String>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: Vec<LlmResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig {
                api_key: Some("sk-or-test".to_string()),
                ..ProviderConfig::default()
            },
            script: Mutex::new(script),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn transport_failure() -> LlmResult<String> {
    Err(LlmError::NetworkError {
        message: "connection reset by peer".to_string(),
    })
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn send_message(
        &self,
        _messages: Vec<Message>,
        _system: Option<String>,
        _request_options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                transport_failure()
            } else {
                script.remove(0)
            }
        };
        next.map(|content| LlmResponse {
            content: Some(content),
            stop_reason: StopReason::EndTurn,
            usage: UsageStats {
                input_tokens: 1200,
                output_tokens: 800,
            },
            model: "scripted-model".to_string(),
        })
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
