use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume with the provider's extraction output.
/// `parsed` and `analysis` hold the AI analysis verbatim as JSONB; the
/// serialized `parsed` blob is also the scoring input for job matching.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: String,
    pub file_name: String,
    pub original_text: String,
    pub parsed: Value,
    pub analysis: Value,
    pub uploaded_at: DateTime<Utc>,
}
