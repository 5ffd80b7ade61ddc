//! Data Models
//!
//! Request/response bodies and application configuration.

pub mod response;
pub mod settings;

pub use response::*;
pub use settings::*;
