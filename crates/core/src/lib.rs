//! Interview Coach Core
//!
//! Foundational types for the Interview Coach workspace. This crate has zero
//! dependencies on application-level code (HTTP server, LLM providers).
//!
//! ## Module Organization
//!
//! - `analysis` - The canonical `AnalysisResult` schema, its enums and caps
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `proxy` - Outbound proxy configuration shared by the HTTP clients

pub mod analysis;
pub mod error;
pub mod proxy;

// ── Analysis Schema ────────────────────────────────────────────────────
pub use analysis::{
    AnalysisResult, Clarity, CommunicationAnalysis, Decision, Entities, FlowSection, Highlight,
    HighlightCategory, Improvement, InterviewQuality, OverallRecommendation, Priority,
    SeniorityLevel, TechnicalAssessment,
};

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
