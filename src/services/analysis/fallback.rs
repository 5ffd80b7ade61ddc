//! Fallback Analysis
//!
//! Placeholder analysis returned when the upstream reply contained no usable
//! JSON. It is deliberately generic: nothing in it claims to assess the
//! candidate, and it quotes the start of the raw reply for troubleshooting.

use interview_coach_core::analysis::*;

/// Number of characters of the raw reply quoted in the fallback.
pub const RAW_PREFIX_CHARS: usize = 200;

/// Build the parse-failure placeholder analysis.
pub fn create_fallback_analysis(original_input: &str, raw_text: &str) -> AnalysisResult {
    let prefix: String = raw_text.trim().chars().take(RAW_PREFIX_CHARS).collect();
    let raw_note = if prefix.is_empty() {
        "The AI service returned an empty response.".to_string()
    } else {
        format!("The AI response could not be parsed. It began with: \"{}\"", prefix)
    };
    let word_count = original_input.split_whitespace().count();

    AnalysisResult {
        highlights: vec![Highlight {
            text: "Transcript received, but the automated analysis could not be read".to_string(),
            category: HighlightCategory::General,
            confidence: 0.0,
            reasoning: raw_note,
        }],
        improvements: vec![Improvement {
            text: "Analysis unavailable for this transcript".to_string(),
            suggestion: "Submit the transcript again to request a fresh analysis".to_string(),
            priority: Priority::Medium,
            category: "general".to_string(),
        }],
        technical_assessment: TechnicalAssessment {
            level: SeniorityLevel::Unknown,
            skills_demonstrated: Vec::new(),
            knowledge_gaps: Vec::new(),
            problem_solving_approach: "Unable to assess: the analysis response was not valid JSON"
                .to_string(),
        },
        communication_analysis: CommunicationAnalysis {
            clarity: Clarity::Fair,
            structure: "Unable to assess".to_string(),
            listening: "Unable to assess".to_string(),
            questioning: "Unable to assess".to_string(),
        },
        entities: Entities::default(),
        interview_flow: vec![FlowSection {
            section: "Full transcript".to_string(),
            summary: format!(
                "Transcript of {} words received; no structured breakdown available",
                word_count
            ),
            key_moments: Vec::new(),
            duration_estimate: "Unknown".to_string(),
        }],
        overall_recommendation: OverallRecommendation {
            decision: Decision::Maybe,
            confidence: 5,
            key_strengths: Vec::new(),
            main_concerns: vec![
                "Automated analysis failed; review the transcript manually".to_string(),
            ],
            cultural_fit: "Unable to assess".to_string(),
            next_steps: "Retry the analysis or review the transcript manually".to_string(),
        },
        interview_quality: InterviewQuality {
            questions_effectiveness: "Unable to assess".to_string(),
            areas_not_explored: Vec::new(),
            suggested_follow_ups: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::analysis::schema::{validate_analysis, DEFAULT_LEVEL};

    #[test]
    fn test_embeds_raw_prefix() {
        let raw = format!("Sorry, I can't produce JSON. {}", "z".repeat(400));
        let result = create_fallback_analysis("some transcript", &raw);
        let reasoning = &result.highlights[0].reasoning;
        assert!(reasoning.contains("Sorry, I can't produce JSON."));
        assert!(!reasoning.contains(&"z".repeat(RAW_PREFIX_CHARS)));
    }

    #[test]
    fn test_placeholder_values() {
        let result = create_fallback_analysis("one two three", "");
        assert_eq!(result.technical_assessment.level, SeniorityLevel::Unknown);
        assert_eq!(result.overall_recommendation.decision, Decision::Maybe);
        assert_eq!(result.overall_recommendation.confidence, 5);
        assert!(result.highlights[0].reasoning.contains("empty response"));
        assert!(result.interview_flow[0].summary.contains("3 words"));
    }

    #[test]
    fn test_fallback_is_schema_conformant() {
        let result = create_fallback_analysis("input", &"x".repeat(1000));
        let revalidated = validate_analysis(&serde_json::to_value(&result).unwrap());

        // Only the level changes: `unknown` is reserved for this placeholder
        let mut expected = result.clone();
        expected.technical_assessment.level = DEFAULT_LEVEL;
        assert_eq!(revalidated, expected);
    }
}
