//! Integration Tests Module
//!
//! End-to-end tests for the Interview Coach backend: response normalization
//! properties, orchestration outcomes against scripted providers, and the
//! HTTP routes driven through the axum router.

// Shared scripted provider
mod support;

// Response normalizer properties
mod normalizer_test;

// Orchestrator outcome table
mod orchestrator_test;

// HTTP routes
mod server_test;
