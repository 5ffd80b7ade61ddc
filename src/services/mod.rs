//! Services
//!
//! Business logic services for the application.
//! Services handle the core functionality and are called by the HTTP handlers.

pub mod analysis;
pub mod persona;
pub mod transcription;

pub use analysis::{AnalysisConfig, AnalysisError, AnalysisOrchestrator, AnalysisOutput};
pub use persona::{AnalysisContext, InterviewType, Mentor};
pub use transcription::{AudioUpload, Transcript, TranscriptionService};
