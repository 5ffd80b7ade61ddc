//! Response Normalizer
//!
//! Turns a free-form LLM reply into an [`AnalysisResult`]. The reply may be
//! wrapped in markdown fences or surrounded by prose; the first syntactically
//! complete JSON object is extracted with a balanced-brace scanner and passed
//! through the schema validators. Anything unparseable becomes a fallback
//! analysis, so normalization never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use interview_coach_core::analysis::AnalysisResult;

use super::fallback::create_fallback_analysis;
use super::schema::validate_analysis;

/// How a reply was turned into a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeOutcome {
    /// A JSON object was found and validated
    Parsed,
    /// No parseable object; the fallback analysis was returned
    Fallback,
}

/// Stateless normalizer over raw upstream text.
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    /// Normalize a raw reply into a schema-conformant analysis.
    pub fn normalize(raw_text: &str, original_input: &str) -> AnalysisResult {
        Self::normalize_with_outcome(raw_text, original_input).0
    }

    /// Normalize and report whether the reply parsed.
    pub fn normalize_with_outcome(
        raw_text: &str,
        original_input: &str,
    ) -> (AnalysisResult, NormalizeOutcome) {
        let candidate = strip_code_fences(raw_text);

        match find_json_object(candidate) {
            Some(value) => {
                debug!(
                    fields = value.as_object().map_or(0, |o| o.len()),
                    "extracted analysis JSON"
                );
                (validate_analysis(&value), NormalizeOutcome::Parsed)
            }
            None => {
                warn!(
                    response_len = raw_text.len(),
                    "no parseable JSON object in analysis response, using fallback"
                );
                (
                    create_fallback_analysis(original_input, raw_text),
                    NormalizeOutcome::Fallback,
                )
            }
        }
    }
}

/// Extract the body of the first fenced code block, or the trimmed text when
/// there is no complete fence pair.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        // Skip an optional language tag such as `json`
        let tag_len = after_fence
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(after_fence.len());
        let body = &after_fence[tag_len..];
        let body = body
            .strip_prefix("\r\n")
            .or_else(|| body.strip_prefix('\n'))
            .unwrap_or(body);
        if let Some(end) = body.find("```") {
            return body[..end].trim();
        }
    }

    trimmed
}

/// Find the first balanced `{...}` span that parses as a JSON object.
///
/// A balanced candidate that fails to parse is skipped and the scan resumes
/// after its opening brace, as is an unclosed brace in prose. An unclosed
/// brace that opens like an object (`{"` or `{}`) is a truncated reply and
/// ends the search, so fragments nested inside it are never returned.
pub fn find_json_object(text: &str) -> Option<Value> {
    let mut from = 0;
    while let Some(offset) = text[from..].find('{') {
        let start = from + offset;
        let Some(end) = matching_brace(text, start) else {
            if opens_object(text, start) {
                debug!(start, "unterminated JSON object, giving up");
                return None;
            }
            from = start + 1;
            continue;
        };
        let slice = &text[start..=end];
        match serde_json::from_str::<Value>(slice) {
            Ok(value) if value.is_object() => return Some(value),
            Ok(_) => {}
            Err(e) => debug!(error = %e, start, "skipping unparseable JSON candidate"),
        }
        from = start + 1;
    }
    None
}

/// Whether the `{` at `start` is followed by a key or an immediate `}`.
fn opens_object(text: &str, start: usize) -> bool {
    matches!(
        text[start + 1..].trim_start().chars().next(),
        Some('"') | Some('}')
    )
}

/// Byte index of the `}` closing the `{` at `start`, ignoring braces inside
/// string literals.
fn matching_brace(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, byte) in text.as_bytes().iter().enumerate().skip(start) {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
