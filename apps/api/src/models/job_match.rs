use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored job-match result. Created once per match request, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobMatchRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub job_description: String,
    pub match_score: i32,
    /// `MatchDetails` serialized as JSONB.
    pub match_details: Value,
    pub cover_letter: String,
    pub created_at: DateTime<Utc>,
}
