//! Persona Types
//!
//! Mentor voice and interview type tags, parsed leniently from caller input.

use serde::{Deserialize, Serialize};

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Voice the feedback is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mentor {
    #[default]
    Balanced,
    Supportive,
    Challenging,
    Technical,
}

impl Mentor {
    /// Parse a caller tag. Unknown or missing tags yield the default.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(normalize_tag).as_deref() {
            Some("supportive") => Mentor::Supportive,
            Some("challenging") => Mentor::Challenging,
            Some("technical") => Mentor::Technical,
            _ => Mentor::Balanced,
        }
    }

    /// Short identifier (used in logs and metadata).
    pub fn id(&self) -> &'static str {
        match self {
            Mentor::Balanced => "balanced",
            Mentor::Supportive => "supportive",
            Mentor::Challenging => "challenging",
            Mentor::Technical => "technical",
        }
    }

    /// Prompt sentence describing the feedback voice.
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            Mentor::Balanced => {
                "Give balanced feedback that weighs strengths and weaknesses evenly."
            }
            Mentor::Supportive => {
                "Write as an encouraging mentor: lead with strengths and frame gaps as growth opportunities."
            }
            Mentor::Challenging => {
                "Write as a demanding bar-raiser: press on weak answers and hold the candidate to a high standard."
            }
            Mentor::Technical => {
                "Write as a principal engineer: focus on technical depth, correctness and trade-offs."
            }
        }
    }

    /// Flavor line used by the offline demo analysis.
    pub fn demo_flavor(&self) -> &'static str {
        match self {
            Mentor::Balanced => "Solid foundation with clear room to grow",
            Mentor::Supportive => "Encouraging start that shows real potential",
            Mentor::Challenging => "Answers need more depth to clear a high bar",
            Mentor::Technical => "Technical reasoning should be backed by concrete trade-offs",
        }
    }
}

impl std::fmt::Display for Mentor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Kind of interview the transcript comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    #[default]
    General,
    Technical,
    Behavioral,
    SystemDesign,
}

impl InterviewType {
    /// Parse a caller tag. Unknown or missing tags yield the default.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(normalize_tag).as_deref() {
            Some("technical") => InterviewType::Technical,
            Some("behavioral") | Some("behavioural") => InterviewType::Behavioral,
            Some("system_design") | Some("systemdesign") => InterviewType::SystemDesign,
            _ => InterviewType::General,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            InterviewType::General => "general",
            InterviewType::Technical => "technical",
            InterviewType::Behavioral => "behavioral",
            InterviewType::SystemDesign => "system_design",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            InterviewType::General => "general",
            InterviewType::Technical => "technical",
            InterviewType::Behavioral => "behavioral",
            InterviewType::SystemDesign => "system design",
        }
    }

    /// Prompt sentence telling the model what to weigh.
    pub fn prompt_instruction(&self) -> &'static str {
        match self {
            InterviewType::General => {
                "Assess overall fit, communication and motivation."
            }
            InterviewType::Technical => {
                "Weigh coding ability, technical knowledge and debugging approach most heavily."
            }
            InterviewType::Behavioral => {
                "Weigh STAR-structured answers, ownership and collaboration most heavily."
            }
            InterviewType::SystemDesign => {
                "Weigh requirements gathering, scalability reasoning and trade-off analysis most heavily."
            }
        }
    }

    /// Section names used by the offline demo interview flow.
    pub fn demo_sections(&self) -> [&'static str; 3] {
        match self {
            InterviewType::General => [
                "Introduction",
                "Background and experience",
                "Candidate questions",
            ],
            InterviewType::Technical => ["Introduction", "Technical deep dive", "Wrap-up"],
            InterviewType::Behavioral => ["Introduction", "Situational questions", "Wrap-up"],
            InterviewType::SystemDesign => [
                "Requirements",
                "High-level design",
                "Scaling and trade-offs",
            ],
        }
    }
}

impl std::fmt::Display for InterviewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Both context tags of one analysis request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    pub mentor: Mentor,
    pub interview_type: InterviewType,
}

impl AnalysisContext {
    /// Build a context from the raw optional caller tags.
    pub fn from_tags(mentor: Option<&str>, interview_type: Option<&str>) -> Self {
        Self {
            mentor: Mentor::from_tag(mentor),
            interview_type: InterviewType::from_tag(interview_type),
        }
    }
}
