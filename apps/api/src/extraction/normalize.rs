//! Canonicalization of extracted values onto the stored enumerations.
//!
//! Unrecognized or missing values fall to the lowest tier:
//! seniority → Junior, qualification → High School.

use crate::extraction::{CandidateAttributes, RawAttributes};
use crate::models::candidate::{Qualification, Seniority};

const UNKNOWN_NAME: &str = "Unknown";
/// Width of the `name` column.
const MAX_NAME_CHARS: usize = 255;
pub const DEFAULT_SENIORITY: Seniority = Seniority::Junior;
pub const DEFAULT_QUALIFICATION: Qualification = Qualification::HighSchool;

const SENIORITY_SYNONYMS: &[(&str, Seniority)] = &[
    ("junior", Seniority::Junior),
    ("jr", Seniority::Junior),
    ("entry", Seniority::Junior),
    ("intern", Seniority::Junior),
    ("graduate", Seniority::Junior),
    ("mid", Seniority::Mid),
    ("mid senior", Seniority::Mid),
    ("middle", Seniority::Mid),
    ("intermediate", Seniority::Mid),
    ("senior", Seniority::Senior),
    ("sr", Seniority::Senior),
    ("lead", Seniority::Lead),
    ("tech lead", Seniority::Lead),
    ("team lead", Seniority::Lead),
    ("staff", Seniority::Lead),
    ("principal", Seniority::Principal),
    ("architect", Seniority::Principal),
    ("distinguished", Seniority::Principal),
];

const QUALIFICATION_SYNONYMS: &[(&str, Qualification)] = &[
    ("high school", Qualification::HighSchool),
    ("highschool", Qualification::HighSchool),
    ("secondary", Qualification::HighSchool),
    ("ged", Qualification::HighSchool),
    ("bachelors", Qualification::Bachelors),
    ("bsc", Qualification::Bachelors),
    ("bs", Qualification::Bachelors),
    ("ba", Qualification::Bachelors),
    ("btech", Qualification::Bachelors),
    ("be", Qualification::Bachelors),
    ("beng", Qualification::Bachelors),
    ("undergraduate", Qualification::Bachelors),
    ("masters", Qualification::Masters),
    ("msc", Qualification::Masters),
    ("ms", Qualification::Masters),
    ("ma", Qualification::Masters),
    ("mba", Qualification::Masters),
    ("mtech", Qualification::Masters),
    ("meng", Qualification::Masters),
    ("phd", Qualification::Phd),
    ("doctorate", Qualification::Phd),
    ("doctoral", Qualification::Phd),
    ("dphil", Qualification::Phd),
    ("diploma", Qualification::Diploma),
    ("associate", Qualification::Diploma),
    ("associates", Qualification::Diploma),
    ("certification", Qualification::Certification),
    ("certificate", Qualification::Certification),
    ("certified", Qualification::Certification),
];

/// Degree phrases recognised by prefix ("Bachelor of Science", "Master's in CS").
const QUALIFICATION_PREFIXES: &[(&str, Qualification)] = &[
    ("bachelor", Qualification::Bachelors),
    ("master", Qualification::Masters),
    ("doctor of", Qualification::Phd),
];

/// Pure and idempotent: `normalize(normalize(x).into()) == normalize(x)`.
pub fn normalize(raw: RawAttributes) -> CandidateAttributes {
    CandidateAttributes {
        name: normalize_name(raw.name.as_deref()),
        skills: normalize_skills(raw.skills),
        seniority: raw
            .seniority
            .as_deref()
            .and_then(parse_seniority)
            .unwrap_or(DEFAULT_SENIORITY),
        qualifications: raw
            .qualifications
            .as_deref()
            .and_then(parse_qualification)
            .unwrap_or(DEFAULT_QUALIFICATION),
    }
}

fn normalize_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() && !n.eq_ignore_ascii_case(UNKNOWN_NAME) => {
            if n.chars().count() <= MAX_NAME_CHARS {
                n.to_string()
            } else {
                n.chars()
                    .take(MAX_NAME_CHARS)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            }
        }
        _ => UNKNOWN_NAME.to_string(),
    }
}

fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Accepts storage codes, display labels and common synonyms.
pub fn parse_seniority(value: &str) -> Option<Seniority> {
    let key = synonym_key(value);
    Seniority::ALL
        .into_iter()
        .find(|s| synonym_key(s.as_str()) == key || synonym_key(s.label()) == key)
        .or_else(|| lookup(SENIORITY_SYNONYMS, &key))
}

/// Accepts storage codes, display labels and common synonyms.
pub fn parse_qualification(value: &str) -> Option<Qualification> {
    let key = synonym_key(value);
    Qualification::ALL
        .into_iter()
        .find(|q| synonym_key(q.as_str()) == key || synonym_key(q.label()) == key)
        .or_else(|| lookup(QUALIFICATION_SYNONYMS, &key))
        .or_else(|| {
            QUALIFICATION_PREFIXES
                .iter()
                .find(|(prefix, _)| key.starts_with(prefix))
                .map(|(_, q)| *q)
        })
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Lowercase; `_` and `-` become spaces; dots and apostrophes vanish; a
/// trailing "degree" or "level" qualifier is dropped; whitespace collapsed.
fn synonym_key(value: &str) -> String {
    let cleaned: String = value
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | '\'' | '\u{2019}'))
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();
    let mut words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() > 1 && words.last().is_some_and(|w| matches!(*w, "degree" | "level")) {
        words.pop();
    }
    words.join(" ")
}
