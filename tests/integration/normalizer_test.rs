//! Response Normalizer Integration Tests
//!
//! Properties of the normalizer over realistic and hostile LLM replies:
//! - Schema completeness for every input shape
//! - Truncation, enum coercion and clamping
//! - Idempotent re-validation

use serde_json::{json, Value};

use interview_coach::services::analysis::{
    validate_analysis, NormalizeOutcome, ResponseNormalizer,
};
use interview_coach_core::analysis::{AnalysisResult, Decision, MAX_HIGHLIGHTS};

use crate::support::TRANSCRIPT;

fn assert_schema_complete(result: &AnalysisResult) {
    let value = serde_json::to_value(result).unwrap();
    let object = value.as_object().unwrap();
    for field in AnalysisResult::FIELDS {
        assert!(object.contains_key(field), "missing {}", field);
    }
    assert!(object["entities"]["technologies"].is_array());
    assert!(object["overall_recommendation"]["confidence"].is_i64());
}

// ============================================================================
// Schema Completeness
// ============================================================================

#[test]
fn test_every_input_shape_yields_complete_schema() {
    let inputs = [
        r#"{"highlights": [{"text": "Great STAR answer", "category": "communication", "confidence": 0.9, "reasoning": "Clear"}]}"#,
        "{not: valid json}",
        "",
        "{}",
        "null",
        "```json\n{\"entities\": {\"technologies\": [\"Rust\"]}}\n```",
    ];
    for raw in inputs {
        let result = ResponseNormalizer::normalize(raw, TRANSCRIPT);
        assert_schema_complete(&result);
    }
}

#[test]
fn test_realistic_chatty_reply_is_parsed() {
    let raw = "Here is the analysis you asked for:\n\n```json\n{\n  \"highlights\": [{\"text\": \"Explained caching with {braces} in prose\", \"category\": \"technical_skill\", \"confidence\": 0.85, \"reasoning\": \"Concrete numbers\"}],\n  \"overall_recommendation\": {\"decision\": \"hire\", \"confidence\": 8}\n}\n```\n\nLet me know if you need anything else!";
    let (result, outcome) = ResponseNormalizer::normalize_with_outcome(raw, TRANSCRIPT);
    assert_eq!(outcome, NormalizeOutcome::Parsed);
    assert_eq!(result.highlights.len(), 1);
    assert_eq!(result.overall_recommendation.decision, Decision::Hire);
}

#[test]
fn test_unparseable_reply_embeds_raw_prefix() {
    let raw = "The model is overloaded, please try again later.";
    let (result, outcome) = ResponseNormalizer::normalize_with_outcome(raw, TRANSCRIPT);
    assert_eq!(outcome, NormalizeOutcome::Fallback);
    assert!(result.highlights[0].reasoning.contains(raw));
}

// ============================================================================
// Field Rules
// ============================================================================

#[test]
fn test_twenty_highlights_truncate_to_first_six() {
    let highlights: Vec<Value> = (0..20)
        .map(|i| {
            json!({
                "text": format!("moment {}", i),
                "category": "general",
                "confidence": 0.5,
                "reasoning": "r"
            })
        })
        .collect();
    let raw = json!({ "highlights": highlights }).to_string();
    let result = ResponseNormalizer::normalize(&raw, TRANSCRIPT);

    assert_eq!(result.highlights.len(), MAX_HIGHLIGHTS);
    let texts: Vec<&str> = result.highlights.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["moment 0", "moment 1", "moment 2", "moment 3", "moment 4", "moment 5"]
    );
}

#[test]
fn test_unknown_decision_becomes_maybe() {
    let raw = r#"{"overall_recommendation": {"decision": "super_hire"}}"#;
    let result = ResponseNormalizer::normalize(raw, TRANSCRIPT);
    assert_eq!(result.overall_recommendation.decision, Decision::Maybe);

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["overall_recommendation"]["decision"], "maybe");
}

#[test]
fn test_recommendation_confidence_is_clamped() {
    let high = ResponseNormalizer::normalize(
        r#"{"overall_recommendation": {"confidence": 15}}"#,
        TRANSCRIPT,
    );
    assert_eq!(high.overall_recommendation.confidence, 10);

    let low = ResponseNormalizer::normalize(
        r#"{"overall_recommendation": {"confidence": -3}}"#,
        TRANSCRIPT,
    );
    assert_eq!(low.overall_recommendation.confidence, 1);
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_revalidation_is_a_no_op() {
    let raws = [
        r#"{"highlights": ["bare string", {"text": "x", "confidence": 9}], "entities": {"companies": ["Google", "google", "GOOGLE"]}}"#,
        "total garbage",
        "{}",
    ];
    for raw in raws {
        let first = ResponseNormalizer::normalize(raw, TRANSCRIPT);
        let second = validate_analysis(&serde_json::to_value(&first).unwrap());
        assert_eq!(first, second, "raw = {:?}", raw);
    }
}
