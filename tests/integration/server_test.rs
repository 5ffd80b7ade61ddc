//! HTTP Route Integration Tests
//!
//! Exercises the axum router in-process with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use interview_coach::services::analysis::{AnalysisConfig, AnalysisOrchestrator};
use interview_coach::services::transcription::{TranscriptionService, MAX_AUDIO_BYTES};
use interview_coach::{create_router, AppState};
use interview_coach_llm::LlmProvider;

use crate::support::{ScriptedProvider, TRANSCRIPT};

const BOUNDARY: &str = "----interview-coach-test-boundary";

fn demo_app() -> Router {
    let state = AppState::new(
        AnalysisOrchestrator::new(None, AnalysisConfig::default()),
        TranscriptionService::new(None, MAX_AUDIO_BYTES),
    );
    create_router(state, None)
}

fn app_with_provider(provider: &Arc<ScriptedProvider>) -> Router {
    let state = AppState::new(
        AnalysisOrchestrator::new(
            Some(provider.clone() as Arc<dyn LlmProvider>),
            AnalysisConfig::default(),
        ),
        TranscriptionService::new(None, 1024),
    );
    create_router(state, None)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn analyze_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_request(parts: &[(&str, Option<(&str, &str)>, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file {
            Some((file_name, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/transcribe")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_configuration() {
    let response = demo_app()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "interview-coach");
    assert_eq!(json["analysisConfigured"], false);
    assert_eq!(json["transcriptionConfigured"], false);
}

// ============================================================================
// Analyze
// ============================================================================

#[tokio::test]
async fn test_analyze_in_demo_mode() {
    let response = demo_app()
        .oneshot(analyze_request(json!({
            "transcript": TRANSCRIPT,
            "mentor": "challenging",
            "interviewType": "behavioral"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["metadata"]["demo_mode"], true);
    assert_eq!(json["data"]["metadata"]["mentor"], "challenging");
    assert!(json["data"]["analysis"]["highlights"].is_array());
}

#[tokio::test]
async fn test_analyze_live_reply() {
    let provider = ScriptedProvider::new(vec![Ok(
        r#"{"overall_recommendation": {"decision": "strong_hire", "confidence": 9}}"#.to_string(),
    )]);
    let response = app_with_provider(&provider)
        .oneshot(analyze_request(json!({ "text": TRANSCRIPT })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["metadata"]["demo_mode"], false);
    assert_eq!(json["data"]["metadata"]["attempt_number"], 1);
    assert_eq!(json["data"]["metadata"]["attempts"][0]["success"], true);
    assert_eq!(
        json["data"]["analysis"]["overall_recommendation"]["decision"],
        "strong_hire"
    );
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_analyze_short_input_is_bad_request() {
    let provider = ScriptedProvider::new(vec![]);
    let response = app_with_provider(&provider)
        .oneshot(analyze_request(json!({ "text": "Too short." })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["data"].is_null());
    assert!(json["error"].as_str().unwrap().contains("too short"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_analyze_malformed_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"text\": "))
        .unwrap();
    let response = demo_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

// ============================================================================
// Transcribe
// ============================================================================

#[tokio::test]
async fn test_transcribe_returns_demo_transcript() {
    let response = demo_app()
        .oneshot(multipart_request(&[
            ("audio", Some(("answer.webm", "audio/webm")), b"fake webm bytes"),
            ("language", None, b"en"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["demo_mode"], true);
    assert!(json["data"]["segments"].as_array().unwrap().len() > 1);
}

#[tokio::test]
async fn test_transcribe_without_audio_field_is_bad_request() {
    let response = demo_app()
        .oneshot(multipart_request(&[("language", None, b"en")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transcribe_rejects_non_audio() {
    let response = demo_app()
        .oneshot(multipart_request(&[(
            "audio",
            Some(("notes.txt", "text/plain")),
            b"not audio",
        )]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transcribe_oversized_upload_is_payload_too_large() {
    let provider = ScriptedProvider::new(vec![]);
    let audio = vec![7u8; 4096];
    let response = app_with_provider(&provider)
        .oneshot(multipart_request(&[(
            "audio",
            Some(("long.wav", "audio/wav")),
            &audio,
        )]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

// ============================================================================
// Static Files
// ============================================================================

#[tokio::test]
async fn test_static_files_are_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Interview Coach</h1>").unwrap();

    let state = AppState::new(
        AnalysisOrchestrator::new(None, AnalysisConfig::default()),
        TranscriptionService::new(None, MAX_AUDIO_BYTES),
    );
    let app = create_router(state, Some(dir.path()));

    let response = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Interview Coach</h1>");

    let missing = app
        .oneshot(Request::get("/missing.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
