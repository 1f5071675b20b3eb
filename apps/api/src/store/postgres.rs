use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::candidates::filter::{page_offset, CandidatePage, FilterSettings, PAGE_SIZE};
use crate::models::candidate::{CandidateProfile, CandidateRow};
use crate::skills::skill_key;
use crate::store::{CandidateStore, StoreError};

/// `candidate_profiles` table in PostgreSQL.
#[derive(Clone)]
pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert(&self, candidate: &CandidateProfile) -> Result<CandidateProfile, StoreError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            INSERT INTO candidate_profiles
                (id, name, skills, fe_score, be_score, seniority, qualifications,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(candidate.id)
        .bind(&candidate.name)
        .bind(&candidate.skills)
        .bind(candidate.fe_score)
        .bind(candidate.be_score)
        .bind(candidate.seniority.as_str())
        .bind(candidate.qualifications.as_str())
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .fetch_one(&self.pool)
        .await?;

        CandidateProfile::try_from(row)
    }

    async fn query(&self, filters: &FilterSettings, page: i64) -> Result<CandidatePage, StoreError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM candidate_profiles");
        push_filters(&mut count, filters);
        let total_count: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let offset = match page_offset(page) {
            Some(offset) if offset < total_count => offset,
            _ => {
                debug!(page, total_count, "Requested page is outside the filtered set");
                return Ok(CandidatePage {
                    candidates: Vec::new(),
                    total_count,
                });
            }
        };

        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM candidate_profiles");
        push_filters(&mut select, filters);
        select
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(PAGE_SIZE)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<CandidateRow> = select.build_query_as().fetch_all(&self.pool).await?;
        let candidates = rows
            .into_iter()
            .map(CandidateProfile::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CandidatePage {
            candidates,
            total_count,
        })
    }
}

/// Appends the WHERE clause equivalent to `FilterSettings::matches`.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &FilterSettings) {
    builder.push(" WHERE TRUE");

    if !filters.skills.is_empty() {
        // Same key as `skill_key`, up to the collation caveat documented there.
        let wanted: Vec<String> = filters.skills.iter().map(|s| skill_key(s)).collect();
        builder
            .push(" AND (SELECT COALESCE(array_agg(lower(btrim(s))), '{}'::text[]) FROM unnest(skills) AS s) @> ")
            .push_bind(wanted);
    }
    if let Some(seniority) = filters.seniority {
        builder.push(" AND seniority = ").push_bind(seniority.as_str());
    }
    if let Some(qualifications) = filters.qualifications {
        builder
            .push(" AND qualifications = ")
            .push_bind(qualifications.as_str());
    }
    if let Some(min) = filters.min_fe_score {
        builder.push(" AND fe_score >= ").push_bind(min);
    }
    if let Some(min) = filters.min_be_score {
        builder.push(" AND be_score >= ").push_bind(min);
    }
}
