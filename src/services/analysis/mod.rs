//! Transcript Analysis
//!
//! The response validation and fallback pipeline:
//!
//! - `schema` - Per-field validators shared by every producer of results
//! - `normalizer` - Raw LLM text to validated result (never fails)
//! - `fallback` - Placeholder result for unparseable replies
//! - `demo` - Offline demo result driven by keyword heuristics
//! - `prompts` - System prompt and user message template
//! - `retry` - Bounded retry with linear backoff
//! - `orchestrator` - Ties the above together per request

pub mod demo;
pub mod fallback;
pub mod normalizer;
pub mod orchestrator;
pub mod prompts;
pub mod retry;
pub mod schema;

pub use demo::{create_demo_analysis, detect_entities};
pub use fallback::create_fallback_analysis;
pub use normalizer::{NormalizeOutcome, ResponseNormalizer};
pub use orchestrator::{
    AnalysisConfig, AnalysisError, AnalysisMetadata, AnalysisOrchestrator, AnalysisOutcome,
    AnalysisOutput, MIN_INPUT_CHARS,
};
pub use retry::{AttemptLog, AttemptRecord, FailureReason, RetryPolicy};
pub use schema::validate_analysis;
