//! Offline Demo Analysis
//!
//! Deterministic, schema-conformant analysis produced without calling the AI
//! service. Used when no credentials are configured and as the terminal
//! fallback after upstream failures. Keyword heuristics over the transcript
//! fill the entities and vary the assessment so different inputs produce
//! visibly different results.

use regex::Regex;
use std::sync::OnceLock;

use interview_coach_core::analysis::*;

use crate::services::persona::{AnalysisContext, InterviewType};

/// A keyword table entry: canonical name plus the spellings that match it.
struct Keyword {
    name: &'static str,
    aliases: &'static [&'static str],
}

const fn kw(name: &'static str, aliases: &'static [&'static str]) -> Keyword {
    Keyword { name, aliases }
}

const TECHNOLOGIES: &[Keyword] = &[
    kw("Rust", &["rust"]),
    kw("Python", &["python"]),
    kw("Java", &["java"]),
    kw("JavaScript", &["javascript"]),
    kw("TypeScript", &["typescript"]),
    kw("Go", &["golang"]),
    kw("C++", &["c++"]),
    kw("C#", &["c#"]),
    kw("Kotlin", &["kotlin"]),
    kw("Swift", &["swift"]),
    kw("React", &["react"]),
    kw("Angular", &["angular"]),
    kw("Vue", &["vue", "vue.js"]),
    kw("Node.js", &["node.js", "nodejs"]),
    kw("Django", &["django"]),
    kw("Spring", &["spring boot", "spring"]),
    kw("PostgreSQL", &["postgresql", "postgres"]),
    kw("MySQL", &["mysql"]),
    kw("MongoDB", &["mongodb", "mongo"]),
    kw("Redis", &["redis"]),
    kw("Kafka", &["kafka"]),
    kw("Docker", &["docker"]),
    kw("Kubernetes", &["kubernetes", "k8s"]),
    kw("AWS", &["aws", "amazon web services"]),
    kw("GCP", &["gcp", "google cloud"]),
    kw("Azure", &["azure"]),
    kw("Terraform", &["terraform"]),
    kw("GraphQL", &["graphql"]),
    kw("gRPC", &["grpc"]),
    kw("SQL", &["sql"]),
    kw("Elasticsearch", &["elasticsearch"]),
    kw("Spark", &["apache spark", "pyspark"]),
    kw("TensorFlow", &["tensorflow"]),
    kw("PyTorch", &["pytorch"]),
    kw("Linux", &["linux"]),
];

const COMPANIES: &[Keyword] = &[
    kw("Google", &["google"]),
    kw("Amazon", &["amazon"]),
    kw("Microsoft", &["microsoft"]),
    kw("Meta", &["meta", "facebook"]),
    kw("Apple", &["apple"]),
    kw("Netflix", &["netflix"]),
    kw("Uber", &["uber"]),
    kw("Airbnb", &["airbnb"]),
    kw("Stripe", &["stripe"]),
    kw("Shopify", &["shopify"]),
    kw("Spotify", &["spotify"]),
    kw("Salesforce", &["salesforce"]),
    kw("Oracle", &["oracle"]),
    kw("IBM", &["ibm"]),
    kw("LinkedIn", &["linkedin"]),
];

const METHODOLOGIES: &[Keyword] = &[
    kw("Agile", &["agile"]),
    kw("Scrum", &["scrum"]),
    kw("Kanban", &["kanban"]),
    kw("TDD", &["tdd", "test-driven development", "test driven development"]),
    kw(
        "CI/CD",
        &["ci/cd", "continuous integration", "continuous delivery", "continuous deployment"],
    ),
    kw("DevOps", &["devops"]),
    kw("Microservices", &["microservices", "microservice"]),
    kw("Domain-Driven Design", &["domain-driven design", "domain driven design", "ddd"]),
    kw("Pair programming", &["pair programming", "pairing"]),
    kw("Code review", &["code review", "code reviews"]),
    kw("Event-driven architecture", &["event-driven", "event driven"]),
];

struct CompiledKeyword {
    name: &'static str,
    regex: Regex,
}

fn compile(table: &'static [Keyword]) -> Vec<CompiledKeyword> {
    table
        .iter()
        .filter_map(|k| {
            let alternation = k
                .aliases
                .iter()
                .map(|a| regex::escape(a))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)(?:^|[^\w])(?:{})(?:[^\w]|$)", alternation);
            Regex::new(&pattern).ok().map(|regex| CompiledKeyword {
                name: k.name,
                regex,
            })
        })
        .collect()
}

fn technology_patterns() -> &'static Vec<CompiledKeyword> {
    static PATTERNS: OnceLock<Vec<CompiledKeyword>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile(TECHNOLOGIES))
}

fn company_patterns() -> &'static Vec<CompiledKeyword> {
    static PATTERNS: OnceLock<Vec<CompiledKeyword>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile(COMPANIES))
}

fn methodology_patterns() -> &'static Vec<CompiledKeyword> {
    static PATTERNS: OnceLock<Vec<CompiledKeyword>> = OnceLock::new();
    PATTERNS.get_or_init(|| compile(METHODOLOGIES))
}

fn project_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r#"\b(?:[Pp]roject|[Pp]roduct|[Pp]latform|[Ss]ervice|[Aa]pp|[Ss]ystem|[Tt]ool)\s+(?:called|named)\s+["']?([A-Z][\w-]*)"#,
            )
            .ok()
        })
        .as_ref()
}

fn detect(patterns: &[CompiledKeyword], text: &str, cap: usize) -> Vec<String> {
    patterns
        .iter()
        .filter(|k| k.regex.is_match(text))
        .map(|k| k.name.to_string())
        .take(cap)
        .collect()
}

/// Entities found in a transcript by keyword matching.
pub fn detect_entities(text: &str) -> Entities {
    let mut projects: Vec<String> = Vec::new();
    if let Some(re) = project_pattern() {
        for caps in re.captures_iter(text) {
            if let Some(name) = caps.get(1) {
                let name = name.as_str().to_string();
                if !projects.iter().any(|p| p.eq_ignore_ascii_case(&name)) {
                    projects.push(name);
                }
            }
        }
    }
    projects.truncate(MAX_PROJECTS);

    Entities {
        technologies: detect(technology_patterns(), text, MAX_TECHNOLOGIES),
        companies: detect(company_patterns(), text, MAX_COMPANIES),
        projects,
        methodologies: detect(methodology_patterns(), text, MAX_METHODOLOGIES),
    }
}

fn sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| s.split_whitespace().count() >= 3)
        .map(|s| {
            let mut moment: String = s.chars().take(160).collect();
            if s.chars().count() > 160 {
                moment = format!("{}...", moment.trim_end());
            }
            moment
        })
        .collect()
}

fn join_first(items: &[String], n: usize) -> String {
    items.iter().take(n).cloned().collect::<Vec<_>>().join(", ")
}

/// Build the offline demo analysis for a transcript.
pub fn create_demo_analysis(input: &str, context: &AnalysisContext) -> AnalysisResult {
    let entities = detect_entities(input);
    let word_count = input.split_whitespace().count();
    let tech_count = entities.technologies.len();
    let sentences = sentences(input);

    let level = if tech_count >= 6 && word_count >= 300 {
        SeniorityLevel::Senior
    } else if tech_count >= 3 {
        SeniorityLevel::Mid
    } else {
        SeniorityLevel::Junior
    };

    let average_sentence_words = if sentences.is_empty() {
        0
    } else {
        word_count / sentences.len()
    };
    let clarity = if (8..=25).contains(&average_sentence_words) {
        Clarity::Good
    } else {
        Clarity::Fair
    };

    let (decision, confidence) = if tech_count >= 4 {
        (Decision::Hire, 7)
    } else {
        (Decision::Maybe, 5)
    };

    // ── Highlights ──
    let mut highlights = Vec::new();
    if !entities.technologies.is_empty() {
        highlights.push(Highlight {
            text: format!(
                "Discussed hands-on experience with {}",
                join_first(&entities.technologies, 3)
            ),
            category: HighlightCategory::TechnicalSkill,
            confidence: 0.8,
            reasoning: "Specific technologies were named when describing past work".to_string(),
        });
    }
    if !entities.methodologies.is_empty() {
        highlights.push(Highlight {
            text: format!(
                "Described working practices such as {}",
                join_first(&entities.methodologies, 2)
            ),
            category: HighlightCategory::ProblemSolving,
            confidence: 0.7,
            reasoning: "Process vocabulary suggests experience with structured delivery"
                .to_string(),
        });
    }
    if !entities.companies.is_empty() {
        highlights.push(Highlight {
            text: format!("Referenced experience at {}", join_first(&entities.companies, 2)),
            category: HighlightCategory::General,
            confidence: 0.6,
            reasoning: "Prior employers give context for the candidate's background".to_string(),
        });
    }
    highlights.push(Highlight {
        text: context.mentor.demo_flavor().to_string(),
        category: HighlightCategory::Communication,
        confidence: 0.6,
        reasoning: "Offline demo analysis generated without calling the AI service".to_string(),
    });

    // ── Improvements ──
    let type_improvement = match context.interview_type {
        InterviewType::General => Improvement {
            text: "Connect past experience to the role more explicitly".to_string(),
            suggestion: "Close each answer by stating how it applies to the team you are joining"
                .to_string(),
            priority: Priority::Medium,
            category: "communication".to_string(),
        },
        InterviewType::Technical => Improvement {
            text: "Talk through complexity and edge cases".to_string(),
            suggestion: "State time and space complexity and name two edge cases before coding"
                .to_string(),
            priority: Priority::High,
            category: "technical_skill".to_string(),
        },
        InterviewType::Behavioral => Improvement {
            text: "Use the STAR structure more consistently".to_string(),
            suggestion: "Frame each story as Situation, Task, Action and Result, ending on the outcome"
                .to_string(),
            priority: Priority::High,
            category: "communication".to_string(),
        },
        InterviewType::SystemDesign => Improvement {
            text: "State scaling assumptions explicitly".to_string(),
            suggestion: "Estimate traffic and storage up front and revisit the design against those numbers"
                .to_string(),
            priority: Priority::High,
            category: "problem_solving".to_string(),
        },
    };
    let improvements = vec![
        type_improvement,
        Improvement {
            text: "Quantify the impact of your work".to_string(),
            suggestion: "Attach a metric to each accomplishment, such as latency saved or revenue enabled"
                .to_string(),
            priority: Priority::Medium,
            category: "communication".to_string(),
        },
    ];

    // ── Assessment ──
    let mut skills_demonstrated: Vec<String> = entities
        .technologies
        .iter()
        .chain(entities.methodologies.iter())
        .cloned()
        .collect();
    skills_demonstrated.truncate(MAX_SKILLS_DEMONSTRATED);

    let knowledge_gaps = if entities.technologies.is_empty() {
        vec!["No specific technologies were discussed".to_string()]
    } else {
        vec!["Depth of testing and observability practices".to_string()]
    };

    let section_names = context.interview_type.demo_sections();
    let minutes_per_section = (word_count / 130 / section_names.len()).max(1);
    let interview_flow = section_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let key_moments = sentences
                .get(i * sentences.len() / section_names.len())
                .cloned()
                .into_iter()
                .collect();
            FlowSection {
                section: name.to_string(),
                summary: format!(
                    "{} portion of the {} interview",
                    name,
                    context.interview_type.display_name()
                ),
                key_moments,
                duration_estimate: format!("~{} min", minutes_per_section),
            }
        })
        .collect();

    let mut key_strengths: Vec<String> = highlights
        .iter()
        .filter(|h| h.category != HighlightCategory::Communication)
        .map(|h| h.text.clone())
        .collect();
    if key_strengths.is_empty() {
        key_strengths.push("Engaged and responsive throughout the conversation".to_string());
    }
    key_strengths.truncate(MAX_KEY_STRENGTHS);

    let mut main_concerns = vec!["Limited quantified impact in answers".to_string()];
    if entities.technologies.is_empty() {
        main_concerns.push("Little technical detail was discussed".to_string());
    }

    let next_steps = match decision {
        Decision::Hire | Decision::StrongHire => "Proceed to the next interview round",
        _ => "Schedule a follow-up conversation to cover the open areas",
    };

    let (areas_not_explored, suggested_follow_ups) = match context.interview_type {
        InterviewType::General => (
            vec!["Career motivation", "Team collaboration"],
            vec![
                "What are you looking for in your next role?",
                "Tell me about a disagreement with a teammate and how it was resolved.",
            ],
        ),
        InterviewType::Technical => (
            vec!["Testing strategy", "Production debugging"],
            vec![
                "How would you test this code?",
                "Walk me through the hardest production bug you have fixed.",
            ],
        ),
        InterviewType::Behavioral => (
            vec!["Handling failure", "Leadership without authority"],
            vec![
                "Tell me about a project that failed and what you learned.",
                "Describe a time you influenced a decision you did not own.",
            ],
        ),
        InterviewType::SystemDesign => (
            vec!["Data consistency", "Failure modes"],
            vec![
                "How would the design change at ten times the traffic?",
                "What happens when the primary database becomes unavailable?",
            ],
        ),
    };

    AnalysisResult {
        highlights,
        improvements,
        technical_assessment: TechnicalAssessment {
            level,
            skills_demonstrated,
            knowledge_gaps,
            problem_solving_approach: if tech_count > 0 {
                "Grounds answers in concrete tools and past projects".to_string()
            } else {
                "Answers stay at a general level without concrete examples".to_string()
            },
        },
        communication_analysis: CommunicationAnalysis {
            clarity,
            structure: format!(
                "Transcript of {} words across {} substantive sentences",
                word_count,
                sentences.len()
            ),
            listening: "Responses addressed the questions asked".to_string(),
            questioning: "Few clarifying questions were asked".to_string(),
        },
        entities,
        interview_flow,
        overall_recommendation: OverallRecommendation {
            decision,
            confidence,
            key_strengths,
            main_concerns,
            cultural_fit: "Collaborative tone throughout the conversation".to_string(),
            next_steps: next_steps.to_string(),
        },
        interview_quality: InterviewQuality {
            questions_effectiveness: "Questions covered the core topics for this interview type"
                .to_string(),
            areas_not_explored: areas_not_explored.into_iter().map(String::from).collect(),
            suggested_follow_ups: suggested_follow_ups.into_iter().map(String::from).collect(),
        },
    }
}
