//! Analysis Orchestrator Integration Tests
//!
//! Drives the orchestrator through each row of its outcome table with a
//! scripted provider standing in for the upstream API.

use std::sync::Arc;
use std::time::Duration;

use interview_coach::services::analysis::{
    AnalysisConfig, AnalysisError, AnalysisOrchestrator, AnalysisOutcome,
};
use interview_coach::services::persona::AnalysisContext;
use interview_coach_core::analysis::SeniorityLevel;
use interview_coach_llm::{LlmProvider, ProviderConfig};

use crate::support::{transport_failure, ScriptedProvider, TRANSCRIPT};

fn fast_config() -> AnalysisConfig {
    AnalysisConfig {
        base_delay: Duration::from_millis(5),
        ..AnalysisConfig::default()
    }
}

fn orchestrator_with(provider: &Arc<ScriptedProvider>) -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(
        Some(provider.clone() as Arc<dyn LlmProvider>),
        fast_config(),
    )
}

#[tokio::test]
async fn test_short_input_never_reaches_upstream() {
    let provider = ScriptedProvider::new(vec![Ok("{}".to_string())]);
    let result = orchestrator_with(&provider)
        .analyze("Candidate: yes.", AnalysisContext::default())
        .await;

    assert!(matches!(result, Err(AnalysisError::InvalidInput { .. })));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_missing_credentials_return_demo_immediately() {
    let orchestrator =
        AnalysisOrchestrator::from_provider_config(ProviderConfig::default(), fast_config())
            .unwrap();

    let output = orchestrator
        .analyze(TRANSCRIPT, AnalysisContext::default())
        .await
        .unwrap();

    assert!(output.metadata.demo_mode);
    assert_eq!(output.metadata.attempt_number, 0);
    assert!(output
        .analysis
        .entities
        .technologies
        .contains(&"Rust".to_string()));
    assert_eq!(output.analysis.entities.companies, vec!["Netflix"]);
}

#[tokio::test]
async fn test_three_transport_failures_return_demo() {
    let provider =
        ScriptedProvider::new(vec![transport_failure(), transport_failure(), transport_failure()]);
    let output = orchestrator_with(&provider)
        .analyze(TRANSCRIPT, AnalysisContext::from_tags(Some("supportive"), None))
        .await
        .unwrap();

    assert_eq!(provider.calls(), 3);
    assert!(output.metadata.demo_mode);
    assert_eq!(output.metadata.outcome, AnalysisOutcome::Demo);
    assert_eq!(output.metadata.attempt_number, 3);
}

#[tokio::test]
async fn test_recovery_on_second_attempt() {
    let provider = ScriptedProvider::new(vec![
        transport_failure(),
        Ok(r#"{"technical_assessment": {"level": "staff"}}"#.to_string()),
    ]);
    let output = orchestrator_with(&provider)
        .analyze(TRANSCRIPT, AnalysisContext::default())
        .await
        .unwrap();

    assert_eq!(provider.calls(), 2);
    assert!(!output.metadata.demo_mode);
    assert_eq!(output.metadata.attempt_number, 2);
    assert_eq!(output.analysis.technical_assessment.level, SeniorityLevel::Staff);

    let value = serde_json::to_value(&output.metadata).unwrap();
    assert_eq!(value["attempts"][0]["failure_reason"], "network_error");
    assert_eq!(value["attempts"][1]["success"], true);
}

#[tokio::test]
async fn test_parse_failure_is_success_without_retry() {
    let provider = ScriptedProvider::new(vec![Ok("```\nnot json at all\n```".to_string())]);
    let output = orchestrator_with(&provider)
        .analyze(TRANSCRIPT, AnalysisContext::default())
        .await
        .unwrap();

    assert_eq!(provider.calls(), 1);
    assert!(!output.metadata.demo_mode);
    assert_eq!(output.metadata.outcome, AnalysisOutcome::ParseFallback);
}

#[tokio::test]
async fn test_metadata_serializes_alongside_analysis() {
    let provider = ScriptedProvider::new(vec![Ok("{}".to_string())]);
    let output = orchestrator_with(&provider)
        .analyze(TRANSCRIPT, AnalysisContext::from_tags(Some("technical"), Some("system design")))
        .await
        .unwrap();

    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["metadata"]["outcome"], "live");
    assert_eq!(value["metadata"]["mentor"], "technical");
    assert_eq!(value["metadata"]["interview_type"], "system_design");
    assert_eq!(value["metadata"]["usage"]["input_tokens"], 1200);
    assert!(value["analysis"].get("metadata").is_none());
}
