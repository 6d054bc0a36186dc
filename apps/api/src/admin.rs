//! Aggregate statistics over stored resumes and matches.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_resumes: i64,
    pub total_matches: i64,
    pub avg_resume_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecentResume {
    pub id: Uuid,
    pub file_name: String,
    pub candidate_name: Option<String>,
    pub overall_score: Option<f64>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AdminStatsResponse {
    pub stats: AdminStats,
    pub recent_activity: Vec<RecentResume>,
}

/// GET /api/v1/admin/stats
///
/// Returns totals, the average overall resume score (0 when no resumes
/// exist), and the ten most recently uploaded resumes.
pub async fn handle_stats(
    State(state): State<AppState>,
) -> Result<Json<AdminStatsResponse>, AppError> {
    let total_users =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT user_id) FROM resumes")
            .fetch_one(&state.db)
            .await?;

    let total_resumes = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resumes")
        .fetch_one(&state.db)
        .await?;

    let total_matches = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM job_matches")
        .fetch_one(&state.db)
        .await?;

    let avg_resume_score = sqlx::query_scalar::<_, Option<f64>>(
        "SELECT AVG((analysis->>'overall_score')::float8) FROM resumes",
    )
    .fetch_one(&state.db)
    .await?
    .unwrap_or(0.0);

    let recent_activity = sqlx::query_as::<_, RecentResume>(
        r#"
        SELECT id,
               file_name,
               parsed->>'name' AS candidate_name,
               (analysis->>'overall_score')::float8 AS overall_score,
               uploaded_at
        FROM resumes
        ORDER BY uploaded_at DESC
        LIMIT 10
        "#,
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(AdminStatsResponse {
        stats: AdminStats {
            total_users,
            total_resumes,
            total_matches,
            avg_resume_score,
        },
        recent_activity,
    }))
}
