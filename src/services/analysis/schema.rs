//! Schema Validation
//!
//! Field-by-field coercion of an untrusted JSON value into an
//! [`AnalysisResult`]. Each of the eight top-level fields has its own
//! validator; a malformed field is replaced by its default without affecting
//! the others. Validating already-validated output yields the same result.

use serde_json::{Map, Value};

use interview_coach_core::analysis::*;

// ============================================================================
// Field Defaults
// ============================================================================

pub const DEFAULT_HIGHLIGHT_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_RECOMMENDATION_CONFIDENCE: i64 = 5;
pub const DEFAULT_IMPROVEMENT_CATEGORY: &str = "general";
pub const DEFAULT_LEVEL: SeniorityLevel = SeniorityLevel::Mid;

const NO_REASONING: &str = "No reasoning provided";
const NO_SUGGESTION: &str = "No specific suggestion provided";
const NOT_ASSESSED: &str = "Not assessed";
const UNTITLED_SECTION: &str = "Interview section";
const NO_SUMMARY: &str = "No summary provided";
const UNKNOWN_DURATION: &str = "Unknown";
const NO_NEXT_STEPS: &str = "Review the full transcript before deciding";

/// Validate a parsed JSON value into a complete analysis.
///
/// A non-object root is treated as an empty object, so every field falls
/// back to its default.
pub fn validate_analysis(value: &Value) -> AnalysisResult {
    let empty = Map::new();
    let root = value.as_object().unwrap_or(&empty);

    AnalysisResult {
        highlights: validate_highlights(field(root, "highlights")),
        improvements: validate_improvements(field(root, "improvements")),
        technical_assessment: validate_technical_assessment(field(root, "technical_assessment")),
        communication_analysis: validate_communication_analysis(field(
            root,
            "communication_analysis",
        )),
        entities: validate_entities(field(root, "entities")),
        interview_flow: validate_interview_flow(field(root, "interview_flow")),
        overall_recommendation: validate_overall_recommendation(field(
            root,
            "overall_recommendation",
        )),
        interview_quality: validate_interview_quality(field(root, "interview_quality")),
    }
}

pub fn validate_highlights(value: Option<&Value>) -> Vec<Highlight> {
    items(value, MAX_HIGHLIGHTS, |obj| {
        let text = text_or(field(obj, "text"), "");
        if text.is_empty() {
            return None;
        }
        Some(Highlight {
            text,
            category: enum_or(
                field(obj, "category"),
                HighlightCategory::parse,
                HighlightCategory::General,
            ),
            confidence: unit_interval(field(obj, "confidence"), DEFAULT_HIGHLIGHT_CONFIDENCE),
            reasoning: text_or(field(obj, "reasoning"), NO_REASONING),
        })
    })
}

pub fn validate_improvements(value: Option<&Value>) -> Vec<Improvement> {
    items(value, MAX_IMPROVEMENTS, |obj| {
        let text = text_or(field(obj, "text"), "");
        if text.is_empty() {
            return None;
        }
        Some(Improvement {
            text,
            suggestion: text_or(field(obj, "suggestion"), NO_SUGGESTION),
            priority: enum_or(field(obj, "priority"), Priority::parse, Priority::Medium),
            category: text_or(field(obj, "category"), DEFAULT_IMPROVEMENT_CATEGORY),
        })
    })
}

pub fn validate_technical_assessment(value: Option<&Value>) -> TechnicalAssessment {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);
    TechnicalAssessment {
        level: enum_or(
            field(obj, "level"),
            SeniorityLevel::parse_assessed,
            DEFAULT_LEVEL,
        ),
        skills_demonstrated: string_set(
            field(obj, "skills_demonstrated"),
            MAX_SKILLS_DEMONSTRATED,
        ),
        knowledge_gaps: string_set(field(obj, "knowledge_gaps"), MAX_KNOWLEDGE_GAPS),
        problem_solving_approach: text_or(field(obj, "problem_solving_approach"), NOT_ASSESSED),
    }
}

pub fn validate_communication_analysis(value: Option<&Value>) -> CommunicationAnalysis {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);
    CommunicationAnalysis {
        clarity: enum_or(field(obj, "clarity"), Clarity::parse, Clarity::Fair),
        structure: text_or(field(obj, "structure"), NOT_ASSESSED),
        listening: text_or(field(obj, "listening"), NOT_ASSESSED),
        questioning: text_or(field(obj, "questioning"), NOT_ASSESSED),
    }
}

pub fn validate_entities(value: Option<&Value>) -> Entities {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);
    Entities {
        technologies: string_set(field(obj, "technologies"), MAX_TECHNOLOGIES),
        companies: string_set(field(obj, "companies"), MAX_COMPANIES),
        projects: string_set(field(obj, "projects"), MAX_PROJECTS),
        methodologies: string_set(field(obj, "methodologies"), MAX_METHODOLOGIES),
    }
}

pub fn validate_interview_flow(value: Option<&Value>) -> Vec<FlowSection> {
    // A bare string item names the section; `text` is not a flow field.
    let promoted = value.map(|v| promote_strings(v, "section"));
    items(promoted.as_ref(), MAX_FLOW_SECTIONS, |obj| {
        let section = text_or(field(obj, "section"), "");
        let summary = text_or(field(obj, "summary"), "");
        if section.is_empty() && summary.is_empty() {
            return None;
        }
        Some(FlowSection {
            section: if section.is_empty() {
                UNTITLED_SECTION.to_string()
            } else {
                section
            },
            summary: if summary.is_empty() {
                NO_SUMMARY.to_string()
            } else {
                summary
            },
            key_moments: string_list(field(obj, "key_moments"), MAX_KEY_MOMENTS),
            duration_estimate: text_or(field(obj, "duration_estimate"), UNKNOWN_DURATION),
        })
    })
}

pub fn validate_overall_recommendation(value: Option<&Value>) -> OverallRecommendation {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);
    OverallRecommendation {
        decision: enum_or(field(obj, "decision"), Decision::parse, Decision::Maybe),
        confidence: clamped_integer(
            field(obj, "confidence"),
            DEFAULT_RECOMMENDATION_CONFIDENCE,
            MIN_RECOMMENDATION_CONFIDENCE,
            MAX_RECOMMENDATION_CONFIDENCE,
        ),
        key_strengths: string_set(field(obj, "key_strengths"), MAX_KEY_STRENGTHS),
        main_concerns: string_set(field(obj, "main_concerns"), MAX_MAIN_CONCERNS),
        cultural_fit: text_or(field(obj, "cultural_fit"), NOT_ASSESSED),
        next_steps: text_or(field(obj, "next_steps"), NO_NEXT_STEPS),
    }
}

pub fn validate_interview_quality(value: Option<&Value>) -> InterviewQuality {
    let empty = Map::new();
    let obj = value.and_then(Value::as_object).unwrap_or(&empty);
    InterviewQuality {
        questions_effectiveness: text_or(field(obj, "questions_effectiveness"), NOT_ASSESSED),
        areas_not_explored: string_set(field(obj, "areas_not_explored"), MAX_AREAS_NOT_EXPLORED),
        suggested_follow_ups: string_set(
            field(obj, "suggested_follow_ups"),
            MAX_SUGGESTED_FOLLOW_UPS,
        ),
    }
}

// ============================================================================
// Primitive Coercions
// ============================================================================

/// Look up a key by its snake_case name, falling back to camelCase.
fn field<'a>(obj: &'a Map<String, Value>, snake: &str) -> Option<&'a Value> {
    obj.get(snake).or_else(|| obj.get(&to_camel_case(snake)))
}

fn to_camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Trim and cap a string at [`MAX_TEXT_CHARS`] characters.
pub fn clean_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.chars().count() <= MAX_TEXT_CHARS {
        return trimmed.to_string();
    }
    trimmed
        .chars()
        .take(MAX_TEXT_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}

/// Scalar to cleaned text; anything else (or blank) yields `default`.
fn text_or(value: Option<&Value>, default: &str) -> String {
    let text = match value {
        Some(Value::String(s)) => clean_text(s),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };
    if text.is_empty() {
        default.to_string()
    } else {
        text
    }
}

fn enum_or<T>(value: Option<&Value>, parse: fn(&str) -> Option<T>, default: T) -> T {
    value
        .and_then(Value::as_str)
        .and_then(parse)
        .unwrap_or(default)
}

fn as_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn unit_interval(value: Option<&Value>, default: f64) -> f64 {
    as_number(value).map_or(default, |n| n.clamp(0.0, 1.0))
}

fn clamped_integer(value: Option<&Value>, default: i64, min: i64, max: i64) -> i64 {
    match as_number(value) {
        Some(n) => (n.round().clamp(min as f64, max as f64)) as i64,
        None => default,
    }
}

/// Ordered list of cleaned, non-empty strings. A bare string counts as a
/// one-element list.
fn string_list(value: Option<&Value>, cap: usize) -> Vec<String> {
    let raw: Vec<&Value> = match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(v @ Value::String(_)) => vec![v],
        _ => return Vec::new(),
    };
    raw.into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(clean_text(s)),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .take(cap)
        .collect()
}

/// Like [`string_list`], de-duplicated case-insensitively before capping.
fn string_set(value: Option<&Value>, cap: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    string_list(value, usize::MAX)
        .into_iter()
        .filter(|s| seen.insert(s.to_lowercase()))
        .take(cap)
        .collect()
}

/// Replace bare string items of an array with `{key: string}` objects.
fn promote_strings(value: &Value, key: &str) -> Value {
    match value {
        Value::Array(arr) => Value::Array(
            arr.iter()
                .map(|item| match item {
                    Value::String(s) => {
                        let mut obj = Map::new();
                        obj.insert(key.to_string(), Value::String(s.clone()));
                        Value::Object(obj)
                    }
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Validate each object item, dropping the rest, then cap.
fn items<T>(
    value: Option<&Value>,
    cap: usize,
    validate: impl Fn(&Map<String, Value>) -> Option<T>,
) -> Vec<T> {
    let Some(Value::Array(arr)) = value else {
        return Vec::new();
    };
    let mut promoted = Map::new();
    arr.iter()
        .filter_map(|item| match item {
            Value::Object(obj) => validate(obj),
            Value::String(s) => {
                promoted.clear();
                promoted.insert("text".to_string(), Value::String(s.clone()));
                validate(&promoted)
            }
            _ => None,
        })
        .take(cap)
        .collect()
}
