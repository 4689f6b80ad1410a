use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entitlement record. One row per (user, film), enforced by a unique index;
/// written only after a confirmed payment and never updated or deleted.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub user_id: Uuid,
    pub film_id: Uuid,
    pub payment_reference: Option<String>,
    pub created_at: NaiveDateTime,
}
