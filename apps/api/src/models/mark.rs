use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MarkRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub marks_scored: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub updated_at: DateTime<Utc>,
}
