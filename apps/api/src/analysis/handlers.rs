//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::analyzer::{analyze_resume, AnalyzedResume};
use crate::analysis::extract::extract_resume_text;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::state::AppState;

/// File name recorded for resumes submitted as raw text.
const TEXT_INPUT_FILE_NAME: &str = "text-input.txt";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub resume_text: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeAnalysisResponse {
    pub resume_id: Uuid,
    pub file_name: String,
    #[serde(flatten)]
    pub analyzed: AnalyzedResume,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/upload
///
/// Multipart upload: a `resume` file part plus an optional `user_id` text
/// part. Extracts text, runs the AI analysis, and persists the result.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeAnalysisResponse>, AppError> {
    let mut file: Option<(String, bytes::Bytes)> = None;
    let mut user_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::Validation("Uploaded file has no name".to_string()))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                file = Some((file_name, data));
            }
            Some("user_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read user_id: {e}")))?;
                user_id = Some(value);
            }
            _ => {}
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    let resume_text = extract_resume_text(&file_name, &data)?;
    let analyzed = analyze_resume(&state.llm, &resume_text).await?;

    let row = persist_resume(&state, user_id, &file_name, &resume_text, &analyzed).await?;

    Ok(Json(ResumeAnalysisResponse {
        resume_id: row.id,
        file_name: row.file_name,
        analyzed,
    }))
}

/// POST /api/v1/resumes/analyze-text
///
/// Analyzes resume text submitted directly in the request body.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<ResumeAnalysisResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text is required".to_string()));
    }

    let analyzed = analyze_resume(&state.llm, &request.resume_text).await?;

    let row = persist_resume(
        &state,
        request.user_id,
        TEXT_INPUT_FILE_NAME,
        &request.resume_text,
        &analyzed,
    )
    .await?;

    Ok(Json(ResumeAnalysisResponse {
        resume_id: row.id,
        file_name: row.file_name,
        analyzed,
    }))
}

/// GET /api/v1/resumes?user_id=
///
/// Lists a user's resumes, newest first.
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes = sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY uploaded_at DESC",
    )
    .bind(&params.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id
///
/// Returns a single stored resume.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    Ok(Json(resume))
}

async fn persist_resume(
    state: &AppState,
    user_id: Option<String>,
    file_name: &str,
    original_text: &str,
    analyzed: &AnalyzedResume,
) -> Result<ResumeRow, AppError> {
    let parsed =
        serde_json::to_value(&analyzed.parsed_data).map_err(|e| AppError::Internal(e.into()))?;
    let analysis =
        serde_json::to_value(&analyzed.analysis).map_err(|e| AppError::Internal(e.into()))?;

    let row = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (user_id, file_name, original_text, parsed, analysis)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(user_id.unwrap_or_else(|| "anonymous".to_string()))
    .bind(file_name)
    .bind(original_text)
    .bind(&parsed)
    .bind(&analysis)
    .fetch_one(&state.db)
    .await?;

    Ok(row)
}
