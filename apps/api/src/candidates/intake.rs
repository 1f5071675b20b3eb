//! Résumé intake pipeline: PDF → text → attributes → normalize → score → persist.
//!
//! Nothing is written unless every earlier step succeeded; the store sees
//! exactly one INSERT per processed résumé.

use anyhow::anyhow;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::ExtractionSource;
use crate::models::candidate::CandidateProfile;
use crate::scoring::score;
use crate::state::AppState;

#[derive(Debug)]
pub struct ProcessedCandidate {
    pub candidate: CandidateProfile,
    pub source: ExtractionSource,
}

pub async fn process_resume(state: &AppState, pdf: Bytes) -> Result<ProcessedCandidate, AppError> {
    let reader = state.reader.clone();
    let text = tokio::task::spawn_blocking(move || reader.read_text(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow!("PDF extraction task failed: {e}")))??;

    let extracted = state.extractor.extract(&text).await;
    let attributes = extracted.attributes;
    let scores = score(&attributes.skills, attributes.seniority);

    let candidate = CandidateProfile::new(
        attributes.name,
        attributes.skills,
        scores,
        attributes.seniority,
        attributes.qualifications,
    );
    let candidate = state.store.insert(&candidate).await?;

    info!(
        candidate_id = %candidate.id,
        fe_score = candidate.fe_score,
        be_score = candidate.be_score,
        source = ?extracted.source,
        "Candidate profile created"
    );

    Ok(ProcessedCandidate {
        candidate,
        source: extracted.source,
    })
}
