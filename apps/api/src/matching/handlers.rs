//! Axum route handlers for the Match API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::text::extract_pdf_text;
use crate::extraction::{CvProfile, ExtractionError, JobProfile};
use crate::matching::SimilarityReport;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Both skill lists are required (they may be empty). A missing or misspelled
/// field is rejected rather than scored as an empty list.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchRequest {
    pub candidate_skills: Vec<String>,
    pub job_skills: Vec<String>,
    /// Falls back to the configured `MATCH_THRESHOLD`.
    pub threshold: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct DocumentMatchResponse {
    pub candidate: CvProfile,
    pub job: JobProfile,
    pub report: SimilarityReport,
    /// `similarity_score` rendered with two decimals, for display.
    pub final_score: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Matches two already-extracted skill lists.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<SimilarityReport>, AppError> {
    let threshold = request.threshold.unwrap_or(state.config.match_threshold);

    let report = state
        .matcher
        .match_skills(&request.candidate_skills, &request.job_skills, Some(threshold))
        .await?;

    Ok(Json(report))
}

/// POST /api/v1/match/document
///
/// Multipart form with `cv_file` (PDF) and `job_text`. Full pipeline:
/// PDF text → CV extraction, job text → job extraction, then skill match.
pub async fn handle_match_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DocumentMatchResponse>, AppError> {
    let mut cv_file: Option<Vec<u8>> = None;
    let mut job_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("cv_file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read cv_file: {e}")))?;
                cv_file = Some(bytes.to_vec());
            }
            Some("job_text") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read job_text: {e}")))?;
                job_text = Some(text);
            }
            _ => {}
        }
    }

    let cv_file = cv_file
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::Validation("cv_file is required".to_string()))?;
    let job_text = job_text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_text cannot be empty".to_string()))?;

    let cv_text = tokio::task::spawn_blocking(move || extract_pdf_text(&cv_file))
        .await
        .map_err(|e| ExtractionError::Pdf(format!("PDF parser aborted: {e}")))??;

    let (candidate, job) = tokio::try_join!(
        state.extractor.extract_cv(&cv_text),
        state.extractor.extract_job(&job_text)
    )?;

    let report = state
        .matcher
        .match_skills(
            &candidate.skills,
            &job.skills,
            Some(state.config.match_threshold),
        )
        .await?;

    info!(
        score = report.similarity_score,
        "document match complete"
    );

    Ok(Json(DocumentMatchResponse {
        final_score: format!("{:.2}", report.similarity_score),
        candidate,
        job,
        report,
    }))
}
