use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::Scores;
use crate::store::StoreError;

/// Experience tier. Stored and serialized as its lowercase code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Lead,
    Principal,
}

impl Seniority {
    pub const ALL: [Seniority; 5] = [
        Seniority::Junior,
        Seniority::Mid,
        Seniority::Senior,
        Seniority::Lead,
        Seniority::Principal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::Senior => "senior",
            Seniority::Lead => "lead",
            Seniority::Principal => "principal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Seniority::Junior => "Junior",
            Seniority::Mid => "Mid-level",
            Seniority::Senior => "Senior",
            Seniority::Lead => "Lead",
            Seniority::Principal => "Principal",
        }
    }

    /// Exact match on the storage code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == code)
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest educational credential. Stored and serialized as its snake_case code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Qualification {
    HighSchool,
    Bachelors,
    Masters,
    Phd,
    Diploma,
    Certification,
}

impl Qualification {
    pub const ALL: [Qualification; 6] = [
        Qualification::HighSchool,
        Qualification::Bachelors,
        Qualification::Masters,
        Qualification::Phd,
        Qualification::Diploma,
        Qualification::Certification,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Qualification::HighSchool => "high_school",
            Qualification::Bachelors => "bachelors",
            Qualification::Masters => "masters",
            Qualification::Phd => "phd",
            Qualification::Diploma => "diploma",
            Qualification::Certification => "certification",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Qualification::HighSchool => "High School",
            Qualification::Bachelors => "Bachelor's Degree",
            Qualification::Masters => "Master's Degree",
            Qualification::Phd => "PhD",
            Qualification::Diploma => "Diploma",
            Qualification::Certification => "Certification",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.as_str() == code)
    }
}

impl fmt::Display for Qualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored, normalized candidate as persisted and listed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub name: String,
    pub skills: Vec<String>,
    pub fe_score: i32,
    pub be_score: i32,
    pub seniority: Seniority,
    pub qualifications: Qualification,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateProfile {
    /// Builds a fresh record with a new id. `created_at == updated_at`.
    pub fn new(
        name: String,
        skills: Vec<String>,
        scores: Scores,
        seniority: Seniority,
        qualifications: Qualification,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            skills,
            fe_score: scores.fe_score,
            be_score: scores.be_score,
            seniority,
            qualifications,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Row shape of `candidate_profiles`.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub skills: Vec<String>,
    pub fe_score: i32,
    pub be_score: i32,
    pub seniority: String,
    pub qualifications: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for CandidateProfile {
    type Error = StoreError;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        let seniority = Seniority::from_code(&row.seniority).ok_or_else(|| {
            StoreError::Corrupt(format!("candidate {} has seniority '{}'", row.id, row.seniority))
        })?;
        let qualifications = Qualification::from_code(&row.qualifications).ok_or_else(|| {
            StoreError::Corrupt(format!(
                "candidate {} has qualifications '{}'",
                row.id, row.qualifications
            ))
        })?;

        Ok(CandidateProfile {
            id: row.id,
            name: row.name,
            skills: row.skills,
            fe_score: row.fe_score,
            be_score: row.be_score,
            seniority,
            qualifications,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
