//! Deterministic keyword extraction used when the LLM is unavailable.
//! Every heuristic is a case-insensitive substring scan of the raw text.

use crate::extraction::RawAttributes;
use crate::models::candidate::{Qualification, Seniority};

const UNKNOWN_NAME: &str = "Unknown";
const NAME_SCAN_LINES: usize = 5;
const MAX_NAME_LEN: usize = 50;
/// Title lines that otherwise pass as a name.
const HEADING_WORDS: &[&str] = &["resume", "résumé", "curriculum", "vitae", "cv", "profile"];

/// Reported in this order, with this casing.
const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "JavaScript",
    "React",
    "Django",
    "Node.js",
    "Java",
    "C++",
    "C#",
    "AWS",
    "Docker",
    "Kubernetes",
    "Machine Learning",
    "SQL",
    "MongoDB",
    "Git",
    "Linux",
    "HTML",
    "CSS",
    "TypeScript",
    "Vue.js",
    "Angular",
    "Flask",
    "FastAPI",
    "PostgreSQL",
    "Redis",
    "GraphQL",
    "REST API",
];

/// First matching rule wins.
const SENIORITY_RULES: &[(&[&str], Seniority)] = &[
    (&["senior", "sr."], Seniority::Senior),
    (&["principal", "architect"], Seniority::Principal),
    (&["lead"], Seniority::Lead),
    (&["junior", "entry", "jr."], Seniority::Junior),
];
const DEFAULT_SENIORITY: Seniority = Seniority::Junior;

const QUALIFICATION_RULES: &[(&[&str], Qualification)] = &[
    (&["phd", "doctorate", "ph.d"], Qualification::Phd),
    (&["master", "mba", "m.s", "m.a"], Qualification::Masters),
    (&["bachelor", "b.s", "b.a", "b.tech"], Qualification::Bachelors),
    (&["diploma"], Qualification::Diploma),
    (&["certificate", "certification"], Qualification::Certification),
];
const DEFAULT_QUALIFICATION: Qualification = Qualification::Bachelors;

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedExtractor;

impl RuleBasedExtractor {
    /// Always returns a complete record.
    pub fn extract(&self, resume_text: &str) -> RawAttributes {
        let lower = resume_text.to_lowercase();
        RawAttributes {
            name: Some(extract_name(resume_text)),
            skills: extract_skills(&lower),
            seniority: Some(extract_seniority(&lower).as_str().to_string()),
            qualifications: Some(extract_qualification(&lower).as_str().to_string()),
        }
    }
}

fn extract_name(text: &str) -> String {
    text.lines()
        .take(NAME_SCAN_LINES)
        .map(str::trim)
        .find(|line| looks_like_name(line))
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

fn looks_like_name(line: &str) -> bool {
    if line.is_empty() || line.contains('@') || line.contains('+') || line.chars().count() >= MAX_NAME_LEN {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    if words
        .iter()
        .any(|word| HEADING_WORDS.contains(&word.to_lowercase().as_str()))
    {
        return false;
    }
    (2..=4).contains(&words.len())
        && words.iter().all(|word| {
            let letters: Vec<char> = word.chars().filter(|c| *c != '.').collect();
            !letters.is_empty() && letters.iter().all(|c| c.is_alphabetic())
        })
}

fn extract_skills(lower: &str) -> Vec<String> {
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lower.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}

fn extract_seniority(lower: &str) -> Seniority {
    first_rule_match(lower, SENIORITY_RULES).unwrap_or(DEFAULT_SENIORITY)
}

fn extract_qualification(lower: &str) -> Qualification {
    first_rule_match(lower, QUALIFICATION_RULES).unwrap_or(DEFAULT_QUALIFICATION)
}

fn first_rule_match<T: Copy>(lower: &str, rules: &[(&[&str], T)]) -> Option<T> {
    rules
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, value)| *value)
}
