use std::sync::Arc;

use crate::config::Config;
use crate::extraction::FieldExtractor;
use crate::reader::ResumeReader;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CandidateStore>,
    /// LLM-first attribute extraction with rule-based fallback.
    pub extractor: FieldExtractor,
    /// PDF → text. Swappable so handlers can be exercised without real PDFs.
    pub reader: Arc<dyn ResumeReader>,
    pub config: Config,
}
