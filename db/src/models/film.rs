use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog row. `file_name` and `thumbnail_name` are names generated at
/// upload time, relative to the configured upload directory; the raw media
/// name never leaves the gated delivery path.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Film {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub film_type: String,
    pub file_name: String,
    pub thumbnail_name: Option<String>,
    pub creator_id: Uuid,
    pub created_at: NaiveDateTime,
}
