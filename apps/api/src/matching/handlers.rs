//! Axum route handlers for the Matching API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::cover_letter::generate_cover_letter;
use crate::matching::scorer::{MatchDetails, ResumeProfile};
use crate::models::job_match::JobMatchRow;
use crate::models::resume::ResumeRow;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchJobRequest {
    pub resume_id: Uuid,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct MatchJobResponse {
    pub match_id: Uuid,
    pub match_score: u32,
    pub match_details: MatchDetails,
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeIdQuery {
    pub resume_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/matches
///
/// Scores a stored resume against a job description and generates a cover
/// letter. An empty job description is not rejected: the scorer defines a
/// zero-score result for it, keeping the endpoint total.
pub async fn handle_match_job(
    State(state): State<AppState>,
    Json(request): Json<MatchJobRequest>,
) -> Result<Json<MatchJobResponse>, AppError> {
    let resume = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(request.resume_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {} not found", request.resume_id)))?;

    let profile = ResumeProfile::from_parsed_json(&resume.parsed);
    let result = state
        .match_scorer
        .score(&profile, &request.job_description)
        .await?;

    let cover_letter =
        generate_cover_letter(&state.llm, &resume.parsed, &request.job_description).await?;

    let details_json =
        serde_json::to_value(&result.details).map_err(|e| AppError::Internal(e.into()))?;

    let row = sqlx::query_as::<_, JobMatchRow>(
        r#"
        INSERT INTO job_matches (resume_id, job_description, match_score, match_details, cover_letter)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(resume.id)
    .bind(&request.job_description)
    .bind(result.match_score as i32)
    .bind(&details_json)
    .bind(&cover_letter)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(MatchJobResponse {
        match_id: row.id,
        match_score: result.match_score,
        match_details: result.details,
        cover_letter,
    }))
}

/// GET /api/v1/matches?resume_id=
///
/// Lists all stored matches for a resume, newest first.
pub async fn handle_list_matches(
    State(state): State<AppState>,
    Query(params): Query<ResumeIdQuery>,
) -> Result<Json<Vec<JobMatchRow>>, AppError> {
    let matches = sqlx::query_as::<_, JobMatchRow>(
        "SELECT * FROM job_matches WHERE resume_id = $1 ORDER BY created_at DESC",
    )
    .bind(params.resume_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(matches))
}
