//! Candidate persistence. The API only needs insert and a filtered, paginated query.

use async_trait::async_trait;
use thiserror::Error;

use crate::candidates::filter::{CandidatePage, FilterSettings};
use crate::models::candidate::CandidateProfile;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCandidateStore;
pub use postgres::PgCandidateStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt candidate record: {0}")]
    Corrupt(String),

    #[error("Candidate store unavailable: {0}")]
    Unavailable(String),
}

/// Carried in `AppState` as `Arc<dyn CandidateStore>`.
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Persists a new record and returns it as stored.
    async fn insert(&self, candidate: &CandidateProfile) -> Result<CandidateProfile, StoreError>;

    /// Returns the requested 1-based page of matching candidates, newest first,
    /// with the size of the whole filtered set.
    async fn query(&self, filters: &FilterSettings, page: i64) -> Result<CandidatePage, StoreError>;
}
