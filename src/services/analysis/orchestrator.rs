//! Analysis Orchestrator
//!
//! Wraps the upstream chat call with input validation, bounded retries, an
//! overall deadline and the two fallbacks:
//!
//! | Condition | Result |
//! |-----------|--------|
//! | input too short | `AnalysisError::InvalidInput`, no upstream call |
//! | no usable credentials | offline demo |
//! | reply parses | validated live result |
//! | reply does not parse | fallback analysis (not retried) |
//! | every attempt fails, or the deadline passes | offline demo |

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use interview_coach_core::analysis::AnalysisResult;
use interview_coach_llm::{
    LlmProvider, LlmRequestOptions, LlmResult, Message, OpenAICompatibleProvider, ProviderConfig,
    UsageStats,
};

use super::demo::create_demo_analysis;
use super::normalizer::{NormalizeOutcome, ResponseNormalizer};
use super::prompts::{build_analysis_prompt, ANALYSIS_SYSTEM_PROMPT};
use super::retry::{execute_with_retry, AttemptLog, AttemptRecord, RetryError, RetryPolicy};
use crate::services::persona::{AnalysisContext, InterviewType, Mentor};

/// Minimum number of non-whitespace characters accepted for analysis.
pub const MIN_INPUT_CHARS: usize = 50;

/// Errors surfaced to the caller. Upstream failures never are.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Transcript too short: {actual} non-whitespace characters, at least {required} required")]
    InvalidInput { required: usize, actual: usize },
}

/// Orchestration settings
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Attempts per request, including the first
    pub max_attempts: u32,
    /// Linear backoff unit between attempts
    pub base_delay: Duration,
    /// Deadline for the whole attempt sequence
    pub overall_timeout: Duration,
    pub min_input_chars: usize,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            overall_timeout: Duration::from_secs(90),
            min_input_chars: MIN_INPUT_CHARS,
            temperature: 0.3,
            max_tokens: 4000,
        }
    }
}

impl AnalysisConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: self.base_delay,
        }
    }
}

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Parsed and validated upstream reply
    Live,
    /// Upstream replied but no JSON could be extracted
    ParseFallback,
    /// Offline demo content
    Demo,
}

/// Information about how a result was produced. Travels next to the
/// analysis, never inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub analysis_id: Uuid,
    pub outcome: AnalysisOutcome,
    pub demo_mode: bool,
    /// Attempt that produced the result; for demo results, the number of
    /// attempts made (0 when no call was made)
    pub attempt_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub mentor: Mentor,
    pub interview_type: InterviewType,
    pub duration_ms: u64,
    pub processed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageStats>,
    /// Every finished upstream attempt, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attempts: Vec<AttemptRecord>,
}

/// An analysis together with its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub analysis: AnalysisResult,
    pub metadata: AnalysisMetadata,
}

/// Analysis orchestrator
pub struct AnalysisOrchestrator {
    provider: Option<Arc<dyn LlmProvider>>,
    config: AnalysisConfig,
}

impl AnalysisOrchestrator {
    /// Create an orchestrator over an explicit provider. `None` means no
    /// credentials: every request gets the offline demo.
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, config: AnalysisConfig) -> Self {
        Self { provider, config }
    }

    /// Create an orchestrator from provider credentials. A missing or
    /// placeholder API key selects demo mode.
    pub fn from_provider_config(
        provider_config: ProviderConfig,
        config: AnalysisConfig,
    ) -> LlmResult<Self> {
        if !provider_config.has_usable_api_key() {
            info!("analysis API key not configured, serving offline demo analyses");
            return Ok(Self::new(None, config));
        }
        let provider = OpenAICompatibleProvider::new(provider_config)?;
        info!(provider = provider.name(), model = provider.model(), "analysis provider ready");
        Ok(Self::new(Some(Arc::new(provider)), config))
    }

    /// Whether requests go to a real upstream.
    pub fn is_live(&self) -> bool {
        self.provider.is_some()
    }

    /// Analyze a transcript. Only caller errors are returned as `Err`.
    pub async fn analyze(
        &self,
        text: &str,
        context: AnalysisContext,
    ) -> Result<AnalysisOutput, AnalysisError> {
        let started = Instant::now();

        let actual = text.chars().filter(|c| !c.is_whitespace()).count();
        if actual < self.config.min_input_chars {
            warn!(actual, required = self.config.min_input_chars, "rejecting short transcript");
            return Err(AnalysisError::InvalidInput {
                required: self.config.min_input_chars,
                actual,
            });
        }

        let Some(provider) = &self.provider else {
            info!(
                mentor = %context.mentor,
                interview_type = %context.interview_type,
                "no credentials, returning offline demo"
            );
            return Ok(self.demo_output(text, context, 0, Vec::new(), started));
        };

        let user_message = build_analysis_prompt(text, &context);
        let options = LlmRequestOptions {
            temperature_override: Some(self.config.temperature),
            max_tokens_override: Some(self.config.max_tokens),
        };
        let policy = self.config.retry_policy();
        let attempts_made = AtomicU32::new(0);
        let mut log = AttemptLog::new();

        let run = execute_with_retry(&policy, &mut log, |attempt| {
            attempts_made.store(attempt, Ordering::SeqCst);
            let provider = Arc::clone(provider);
            let messages = vec![Message::user(user_message.clone())];
            let options = options.clone();
            async move {
                provider
                    .send_message(messages, Some(ANALYSIS_SYSTEM_PROMPT.to_string()), options)
                    .await
            }
        });

        let result = tokio::time::timeout(self.config.overall_timeout, run).await;
        match result {
            Ok(Ok((response, attempt))) => {
                let (analysis, outcome) =
                    ResponseNormalizer::normalize_with_outcome(response.text(), text);
                let outcome = match outcome {
                    NormalizeOutcome::Parsed => AnalysisOutcome::Live,
                    NormalizeOutcome::Fallback => AnalysisOutcome::ParseFallback,
                };
                info!(
                    attempt,
                    ?outcome,
                    failed_attempts = log.failed_attempts_count(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "analysis complete"
                );
                Ok(AnalysisOutput {
                    analysis,
                    metadata: AnalysisMetadata {
                        analysis_id: Uuid::new_v4(),
                        outcome,
                        demo_mode: false,
                        attempt_number: attempt,
                        model: Some(response.model.clone()),
                        mentor: context.mentor,
                        interview_type: context.interview_type,
                        duration_ms: started.elapsed().as_millis() as u64,
                        processed_at: Utc::now(),
                        usage: Some(response.usage),
                        attempts: log.attempts,
                    },
                })
            }
            Ok(Err(RetryError::Exhausted {
                attempts,
                last_error,
            })) => {
                warn!(
                    attempts,
                    error = %last_error,
                    "all analysis attempts failed, returning offline demo"
                );
                Ok(self.demo_output(text, context, attempts, log.attempts, started))
            }
            Err(_) => {
                let attempts = attempts_made.load(Ordering::SeqCst);
                warn!(
                    attempts,
                    timeout_secs = self.config.overall_timeout.as_secs(),
                    "analysis deadline exceeded, returning offline demo"
                );
                Ok(self.demo_output(text, context, attempts, log.attempts, started))
            }
        }
    }

    fn demo_output(
        &self,
        text: &str,
        context: AnalysisContext,
        attempt_number: u32,
        attempts: Vec<AttemptRecord>,
        started: Instant,
    ) -> AnalysisOutput {
        AnalysisOutput {
            analysis: create_demo_analysis(text, &context),
            metadata: AnalysisMetadata {
                analysis_id: Uuid::new_v4(),
                outcome: AnalysisOutcome::Demo,
                demo_mode: true,
                attempt_number,
                model: None,
                mentor: context.mentor,
                interview_type: context.interview_type,
                duration_ms: started.elapsed().as_millis() as u64,
                processed_at: Utc::now(),
                usage: None,
                attempts,
            },
        }
    }
}
