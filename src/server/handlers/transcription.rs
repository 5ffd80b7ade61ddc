//! Transcription endpoint handler

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::models::response::ApiResponse;
use crate::services::transcription::{AudioUpload, Transcript};
use crate::state::AppState;
use crate::utils::error::AppError;

const DEFAULT_FILE_NAME: &str = "recording.webm";

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::validation(err.body_text())
    }
}

/// POST /api/transcribe - Transcribe an uploaded audio file
///
/// Expects `multipart/form-data` with an `audio` file field and an optional
/// `language` text field.
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<Transcript>>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::validation(e.body_text()))?;
    let mut upload = None;
    let mut language = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("audio") | Some("file") => {
                let file_name = field
                    .file_name()
                    .unwrap_or(DEFAULT_FILE_NAME)
                    .to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                upload = Some(AudioUpload {
                    bytes: bytes.to_vec(),
                    file_name,
                    content_type,
                });
            }
            Some("language") => {
                let text = field.text().await.map_err(multipart_error)?;
                language = Some(text.trim().to_string()).filter(|l| !l.is_empty());
            }
            _ => debug!(field = ?name, "ignoring multipart field"),
        }
    }

    let upload =
        upload.ok_or_else(|| AppError::invalid_input("Missing 'audio' file field in upload"))?;
    let transcript = state
        .transcription()
        .transcribe(&upload, language.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(transcript)))
}
