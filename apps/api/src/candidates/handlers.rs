//! Axum route handlers for the candidate API.

use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::candidates::filter::{total_pages, FilterRequest, FilterSettings, PAGE_SIZE};
use crate::candidates::intake::process_resume;
use crate::errors::AppError;
use crate::extraction::ExtractionSource;
use crate::models::candidate::{CandidateProfile, Qualification, Seniority};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const PDF_MIME: &str = "application/pdf";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CandidateData {
    pub name: String,
    pub skills: Vec<String>,
    pub fe_score: i32,
    pub be_score: i32,
    pub seniority: Seniority,
    pub qualifications: Qualification,
}

impl From<&CandidateProfile> for CandidateData {
    fn from(c: &CandidateProfile) -> Self {
        Self {
            name: c.name.clone(),
            skills: c.skills.clone(),
            fe_score: c.fe_score,
            be_score: c.be_score,
            seniority: c.seniority,
            qualifications: c.qualifications,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub message: String,
    pub candidate_id: Uuid,
    pub candidate_data: CandidateData,
    pub extraction_source: ExtractionSource,
}

#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateProfile>,
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub filters_applied: FilterSettings,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/process/
///
/// Multipart upload, field `resume` holding a PDF. Creates one candidate.
pub async fn handle_process(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ProcessResponse>), AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::Validation(format!("Expected a multipart upload: {e}")))?;
    let pdf = read_resume_upload(&mut multipart).await?;

    let processed = process_resume(&state, pdf).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProcessResponse {
            message: "Resume processed successfully".to_string(),
            candidate_id: processed.candidate.id,
            candidate_data: CandidateData::from(&processed.candidate),
            extraction_source: processed.source,
        }),
    ))
}

/// POST /api/get-candidates/
///
/// Filtered, paginated candidate listing, newest first.
pub async fn handle_get_candidates(
    State(state): State<AppState>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let query = request.validate()?;

    let result = state.store.query(&query.filters, query.page).await?;

    Ok(Json(CandidateListResponse {
        candidates: result.candidates,
        total_count: result.total_count,
        page: query.page,
        page_size: PAGE_SIZE,
        total_pages: total_pages(result.total_count),
        filters_applied: query.filters,
    }))
}

/// Finds the `resume` field and returns its bytes. Other fields are skipped.
async fn read_resume_upload(multipart: &mut Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        return read_pdf_field(field).await;
    }

    Err(AppError::Validation("No resume file provided".to_string()))
}

async fn read_pdf_field(field: Field<'_>) -> Result<Bytes, AppError> {
    if !is_pdf_upload(field.content_type(), field.file_name()) {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))?;
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    Ok(data)
}

/// `application/pdf`, or a `.pdf` file sent without a specific type.
fn is_pdf_upload(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    let named_pdf = file_name.is_some_and(|n| n.to_lowercase().ends_with(".pdf"));
    let mime = content_type.map(|ct| {
        ct.split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    });
    match mime.as_deref() {
        Some(PDF_MIME) => true,
        None | Some("application/octet-stream") => named_pdf,
        Some(_) => false,
    }
}
