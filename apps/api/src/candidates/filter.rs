//! Candidate filter validation, evaluation and pagination.
//!
//! All provided constraints are ANDed. Skills use the shared skill matcher:
//! a candidate must have every requested skill (case-insensitive exact match).
//! Pages hold `PAGE_SIZE` records, newest first, 1-based.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extraction::normalize::{parse_qualification, parse_seniority};
use crate::models::candidate::{CandidateProfile, Qualification, Seniority};
use crate::scoring::{MAX_SCORE, MIN_SCORE};
use crate::skills::has_skill;

pub const PAGE_SIZE: i64 = 10;

/// Body of `POST /api/get-candidates/` as sent by the UI.
#[derive(Debug, Default, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default, rename = "seniorityLevel")]
    pub seniority_level: Option<String>,
    #[serde(default)]
    pub qualifications: Option<String>,
    #[serde(default)]
    pub fe_score: Option<i64>,
    #[serde(default)]
    pub be_score: Option<i64>,
}

/// Validated filters. `None` / empty means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterSettings {
    pub skills: Vec<String>,
    #[serde(rename = "seniorityLevel")]
    pub seniority: Option<Seniority>,
    pub qualifications: Option<Qualification>,
    #[serde(rename = "fe_score")]
    pub min_fe_score: Option<i32>,
    #[serde(rename = "be_score")]
    pub min_be_score: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuery {
    pub filters: FilterSettings,
    pub page: i64,
}

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePage {
    pub candidates: Vec<CandidateProfile>,
    pub total_count: i64,
}

impl FilterRequest {
    pub fn validate(self) -> Result<CandidateQuery, AppError> {
        let skills = self
            .skills
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let seniority = match present(self.seniority_level.as_deref()) {
            Some(raw) => Some(parse_seniority(raw).ok_or_else(|| {
                AppError::invalid_filter("seniorityLevel", format!("unknown seniority level '{raw}'"))
            })?),
            None => None,
        };

        let qualifications = match present(self.qualifications.as_deref()) {
            Some(raw) => Some(parse_qualification(raw).ok_or_else(|| {
                AppError::invalid_filter("qualifications", format!("unknown qualification '{raw}'"))
            })?),
            None => None,
        };

        Ok(CandidateQuery {
            filters: FilterSettings {
                skills,
                seniority,
                qualifications,
                min_fe_score: score_threshold("fe_score", self.fe_score)?,
                min_be_score: score_threshold("be_score", self.be_score)?,
            },
            page: self.page.unwrap_or(1),
        })
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn score_threshold(field: &'static str, value: Option<i64>) -> Result<Option<i32>, AppError> {
    match value {
        None => Ok(None),
        Some(v) if (i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&v) => Ok(Some(v as i32)),
        Some(v) => Err(AppError::invalid_filter(
            field,
            format!("must be between {MIN_SCORE} and {MAX_SCORE}, got {v}"),
        )),
    }
}

impl FilterSettings {
    pub fn matches(&self, candidate: &CandidateProfile) -> bool {
        self.skills.iter().all(|wanted| has_skill(&candidate.skills, wanted))
            && self.seniority.map_or(true, |s| candidate.seniority == s)
            && self.qualifications.map_or(true, |q| candidate.qualifications == q)
            && self.min_fe_score.map_or(true, |min| candidate.fe_score >= min)
            && self.min_be_score.map_or(true, |min| candidate.be_score >= min)
    }
}

/// Row offset of a 1-based page, or `None` when the page can hold nothing.
pub fn page_offset(page: i64) -> Option<i64> {
    if page < 1 {
        return None;
    }
    (page - 1).checked_mul(PAGE_SIZE)
}

pub fn total_pages(total_count: i64) -> i64 {
    (total_count + PAGE_SIZE - 1) / PAGE_SIZE
}

/// Listing order: newest first, ties broken by id descending.
pub fn newest_first(a: &CandidateProfile, b: &CandidateProfile) -> Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id))
}

/// Filters, orders and slices an in-memory candidate set.
pub fn select_page<'a, I>(candidates: I, filters: &FilterSettings, page: i64) -> CandidatePage
where
    I: IntoIterator<Item = &'a CandidateProfile>,
{
    let mut matching: Vec<&CandidateProfile> =
        candidates.into_iter().filter(|c| filters.matches(c)).collect();
    matching.sort_by(|a, b| newest_first(a, b));

    let total_count = matching.len() as i64;
    let candidates = match page_offset(page) {
        Some(offset) if offset < total_count => matching
            .into_iter()
            .skip(offset as usize)
            .take(PAGE_SIZE as usize)
            .cloned()
            .collect(),
        _ => Vec::new(),
    };

    CandidatePage {
        candidates,
        total_count,
    }
}
