use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
    pub display_name: String,
    pub bio: String,
    pub location: String,
    pub phone: String,
    pub profile_image_key: Option<String>,
    pub cover_image_key: Option<String>,
    pub is_admin: bool,
    pub marks_completed: bool,
    pub riasec_completed: bool,
    pub riasec_answers: Option<Value>,
    pub riasec_scores: Option<Value>,
    pub riasec_top3: Option<Vec<String>>,
    pub riasec_vector: Option<Vec<f64>>,
    pub riasec_timestamp: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
