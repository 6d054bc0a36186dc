//! Axum route handlers for the Report API.

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_match::JobMatchRow;
use crate::models::resume::ResumeRow;
use crate::report::{build_report_markup, compile_report_pdf, PdfResponse};
use crate::state::AppState;

const REPORT_FILE_NAME: &str = "career-report.pdf";

#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    pub resume_id: Uuid,
    pub match_id: Option<Uuid>,
}

/// POST /api/v1/reports
///
/// Renders a career analysis report for a stored resume — and, when a match
/// id is supplied, its job-match breakdown — and returns the PDF.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(request): Json<GenerateReportRequest>,
) -> Result<PdfResponse, AppError> {
    let resume = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(request.resume_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {} not found", request.resume_id)))?;

    let job_match = match request.match_id {
        Some(match_id) => Some(
            sqlx::query_as::<_, JobMatchRow>("SELECT * FROM job_matches WHERE id = $1")
                .bind(match_id)
                .fetch_optional(&state.db)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))?,
        ),
        None => None,
    };

    let markup = build_report_markup(&resume, job_match.as_ref())?;
    let data = compile_report_pdf(&markup).await?;

    Ok(PdfResponse {
        data,
        filename: REPORT_FILE_NAME.to_string(),
    })
}
