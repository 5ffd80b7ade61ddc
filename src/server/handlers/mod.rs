//! Request handlers, one module per route group.

pub mod analysis;
pub mod health;
pub mod transcription;
