//! Analysis Schema
//!
//! The canonical output schema for an interview transcript analysis. Every
//! field is always present once a result has been normalized; the caps below
//! are the truncation limits applied to each sequence.

use serde::{Deserialize, Serialize};

/// Maximum number of highlight items.
pub const MAX_HIGHLIGHTS: usize = 6;
/// Maximum number of improvement items.
pub const MAX_IMPROVEMENTS: usize = 4;
/// Maximum number of demonstrated skills.
pub const MAX_SKILLS_DEMONSTRATED: usize = 8;
/// Maximum number of knowledge gaps.
pub const MAX_KNOWLEDGE_GAPS: usize = 4;
/// Maximum number of detected technologies.
pub const MAX_TECHNOLOGIES: usize = 10;
/// Maximum number of detected companies.
pub const MAX_COMPANIES: usize = 5;
/// Maximum number of detected projects.
pub const MAX_PROJECTS: usize = 5;
/// Maximum number of detected methodologies.
pub const MAX_METHODOLOGIES: usize = 5;
/// Maximum number of interview flow sections.
pub const MAX_FLOW_SECTIONS: usize = 8;
/// Maximum number of key moments per flow section.
pub const MAX_KEY_MOMENTS: usize = 3;
/// Maximum number of key strengths in the recommendation.
pub const MAX_KEY_STRENGTHS: usize = 4;
/// Maximum number of main concerns in the recommendation.
pub const MAX_MAIN_CONCERNS: usize = 3;
/// Maximum number of unexplored areas.
pub const MAX_AREAS_NOT_EXPLORED: usize = 3;
/// Maximum number of suggested follow-up questions.
pub const MAX_SUGGESTED_FOLLOW_UPS: usize = 4;
/// Maximum length (in characters) of any free-text field.
pub const MAX_TEXT_CHARS: usize = 500;

/// Lowest allowed recommendation confidence.
pub const MIN_RECOMMENDATION_CONFIDENCE: i64 = 1;
/// Highest allowed recommendation confidence.
pub const MAX_RECOMMENDATION_CONFIDENCE: i64 = 10;

/// Declares a snake_case string enum with lenient parsing.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire-format name of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Parse a wire-format name. Case, surrounding whitespace, and
            /// `-`/space separators are ignored.
            pub fn parse(value: &str) -> Option<Self> {
                let normalized = value.trim().to_lowercase().replace(['-', ' '], "_");
                match normalized.as_str() {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Category of an interview highlight.
    HighlightCategory {
        Communication => "communication",
        TechnicalSkill => "technical_skill",
        ProblemSolving => "problem_solving",
        Leadership => "leadership",
        General => "general",
    }
}

string_enum! {
    /// Priority of an improvement suggestion.
    Priority {
        High => "high",
        Medium => "medium",
        Low => "low",
    }
}

string_enum! {
    /// Seniority level inferred from the transcript.
    ///
    /// `Unknown` is only produced when the upstream reply could not be parsed.
    SeniorityLevel {
        Junior => "junior",
        Mid => "mid",
        Senior => "senior",
        Staff => "staff",
        Principal => "principal",
        Unknown => "unknown",
    }
}

impl SeniorityLevel {
    /// Parse a level an assessor may assign. `unknown` is rejected: it marks
    /// a reply that could not be read, not a judgement.
    pub fn parse_assessed(value: &str) -> Option<Self> {
        Self::parse(value).filter(|level| *level != SeniorityLevel::Unknown)
    }
}

string_enum! {
    /// Overall clarity of the candidate's communication.
    Clarity {
        Poor => "poor",
        Fair => "fair",
        Good => "good",
        Excellent => "excellent",
    }
}

string_enum! {
    /// Hiring decision.
    Decision {
        StrongHire => "strong_hire",
        Hire => "hire",
        Maybe => "maybe",
        NoHire => "no_hire",
    }
}

/// A notable moment in the interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    pub category: HighlightCategory,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    pub reasoning: String,
}

/// Something the candidate could do better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub text: String,
    pub suggestion: String,
    pub priority: Priority,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAssessment {
    pub level: SeniorityLevel,
    pub skills_demonstrated: Vec<String>,
    pub knowledge_gaps: Vec<String>,
    pub problem_solving_approach: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationAnalysis {
    pub clarity: Clarity,
    pub structure: String,
    pub listening: String,
    pub questioning: String,
}

/// Named entities mentioned in the transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    pub technologies: Vec<String>,
    pub companies: Vec<String>,
    pub projects: Vec<String>,
    pub methodologies: Vec<String>,
}

/// One section of the interview's flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSection {
    pub section: String,
    pub summary: String,
    pub key_moments: Vec<String>,
    pub duration_estimate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRecommendation {
    pub decision: Decision,
    /// Integer confidence in `[1, 10]`.
    pub confidence: i64,
    pub key_strengths: Vec<String>,
    pub main_concerns: Vec<String>,
    pub cultural_fit: String,
    pub next_steps: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuality {
    pub questions_effectiveness: String,
    pub areas_not_explored: Vec<String>,
    pub suggested_follow_ups: Vec<String>,
}

/// A complete, schema-conformant analysis of one transcript.
///
/// Built fresh per request and never mutated once returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub highlights: Vec<Highlight>,
    pub improvements: Vec<Improvement>,
    pub technical_assessment: TechnicalAssessment,
    pub communication_analysis: CommunicationAnalysis,
    pub entities: Entities,
    pub interview_flow: Vec<FlowSection>,
    pub overall_recommendation: OverallRecommendation,
    pub interview_quality: InterviewQuality,
}

impl AnalysisResult {
    /// Names of the eight top-level fields, in schema order.
    pub const FIELDS: [&'static str; 8] = [
        "highlights",
        "improvements",
        "technical_assessment",
        "communication_analysis",
        "entities",
        "interview_flow",
        "overall_recommendation",
        "interview_quality",
    ];
}
