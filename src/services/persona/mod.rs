//! Persona Module
//!
//! The two optional context tags a caller can attach to an analysis request.
//!
//! | Tag | Values | Default |
//! |-----|--------|---------|
//! | `mentor` | balanced, supportive, challenging, technical | balanced |
//! | `interviewType` | general, technical, behavioral, system_design | general |
//!
//! Tags only change prompt wording and demo flavor text, never the schema.

pub mod types;

pub use types::{AnalysisContext, InterviewType, Mentor};
