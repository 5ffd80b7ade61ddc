//! Analysis Prompts
//!
//! The fixed system prompt describing the output schema, and the user
//! message template parameterized by the two context tags.

use crate::services::persona::AnalysisContext;

/// System prompt describing the exact JSON shape expected back.
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are an expert interview coach analyzing an interview transcript.
Respond with a single JSON object and nothing else. Use exactly this structure:

{
  "highlights": [
    {"text": "...", "category": "communication|technical_skill|problem_solving|leadership|general", "confidence": 0.0-1.0, "reasoning": "..."}
  ],
  "improvements": [
    {"text": "...", "suggestion": "...", "priority": "high|medium|low", "category": "..."}
  ],
  "technical_assessment": {
    "level": "junior|mid|senior|staff|principal",
    "skills_demonstrated": ["..."],
    "knowledge_gaps": ["..."],
    "problem_solving_approach": "..."
  },
  "communication_analysis": {
    "clarity": "poor|fair|good|excellent",
    "structure": "...",
    "listening": "...",
    "questioning": "..."
  },
  "entities": {
    "technologies": ["..."],
    "companies": ["..."],
    "projects": ["..."],
    "methodologies": ["..."]
  },
  "interview_flow": [
    {"section": "...", "summary": "...", "key_moments": ["..."], "duration_estimate": "..."}
  ],
  "overall_recommendation": {
    "decision": "strong_hire|hire|maybe|no_hire",
    "confidence": 1-10,
    "key_strengths": ["..."],
    "main_concerns": ["..."],
    "cultural_fit": "...",
    "next_steps": "..."
  },
  "interview_quality": {
    "questions_effectiveness": "...",
    "areas_not_explored": ["..."],
    "suggested_follow_ups": ["..."]
  }
}

Limits: at most 6 highlights, 4 improvements, 8 skills, 4 knowledge gaps, 10 technologies,
5 companies, 5 projects, 5 methodologies, 8 flow sections with at most 3 key moments each,
4 key strengths, 3 main concerns, 3 unexplored areas and 4 follow-up questions.
Keep every string under 500 characters. Quote evidence from the transcript where possible."#;

/// Build the user message for one transcript.
pub fn build_analysis_prompt(transcript: &str, context: &AnalysisContext) -> String {
    format!(
        "Mentor style: {mentor}. {mentor_instruction}\n\
         Interview type: {interview_type}. {type_instruction}\n\n\
         Analyze the following interview transcript and return the JSON object.\n\n\
         --- TRANSCRIPT START ---\n{transcript}\n--- TRANSCRIPT END ---",
        mentor = context.mentor.id(),
        mentor_instruction = context.mentor.prompt_instruction(),
        interview_type = context.interview_type.display_name(),
        type_instruction = context.interview_type.prompt_instruction(),
        transcript = transcript.trim(),
    )
}
