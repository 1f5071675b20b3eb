use std::sync::RwLock;

use async_trait::async_trait;

use crate::candidates::filter::{select_page, CandidatePage, FilterSettings};
use crate::models::candidate::CandidateProfile;
use crate::store::{CandidateStore, StoreError};

/// Process-local candidate store. Used with `CANDIDATE_STORE=memory` and in tests.
#[derive(Default)]
pub struct MemoryCandidateStore {
    candidates: RwLock<Vec<CandidateProfile>>,
}

impl MemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("candidate store lock poisoned".to_string())
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn insert(&self, candidate: &CandidateProfile) -> Result<CandidateProfile, StoreError> {
        let mut candidates = self.candidates.write().map_err(poisoned)?;
        if candidates.iter().any(|c| c.id == candidate.id) {
            return Err(StoreError::Unavailable(format!(
                "candidate {} already exists",
                candidate.id
            )));
        }
        candidates.push(candidate.clone());
        Ok(candidate.clone())
    }

    async fn query(&self, filters: &FilterSettings, page: i64) -> Result<CandidatePage, StoreError> {
        let candidates = self.candidates.read().map_err(poisoned)?;
        Ok(select_page(candidates.iter(), filters, page))
    }
}
