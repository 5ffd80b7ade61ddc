//! HTTP Server
//!
//! axum router, request handlers and server startup.

pub mod handlers;
pub mod routing;
pub mod startup;

pub use routing::create_router;
pub use startup::start_server;
