use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::riasec::scoring::RiasecResult;

/// Stored assessment results as presented to clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RiasecRecord {
    pub scores: BTreeMap<String, f64>,
    pub top3: Vec<String>,
    pub answers: BTreeMap<String, f64>,
    pub vector: Vec<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl RiasecRecord {
    /// None until the assessment is completed. Malformed stored JSON degrades to empty maps.
    pub fn from_user(user: &User) -> Option<Self> {
        if !user.riasec_completed {
            return None;
        }
        Some(Self {
            scores: user
                .riasec_scores
                .as_ref()
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default(),
            top3: user.riasec_top3.clone().unwrap_or_default(),
            answers: user
                .riasec_answers
                .as_ref()
                .and_then(|v| serde_json::from_value(v.clone()).ok())
                .unwrap_or_default(),
            vector: user.riasec_vector.clone().unwrap_or_default(),
            timestamp: user.riasec_timestamp,
        })
    }

    pub fn score(&self, code: &str) -> f64 {
        self.scores.get(code).copied().unwrap_or(0.0)
    }
}

/// Persists a scored submission and marks the assessment as completed.
pub async fn save_riasec_results(
    pool: &PgPool,
    user_id: Uuid,
    answers: &BTreeMap<String, u8>,
    result: &RiasecResult,
) -> Result<(), AppError> {
    let top3: Vec<String> = result.top3.iter().map(|t| t.code().to_string()).collect();

    sqlx::query(
        r#"
        UPDATE users
        SET riasec_answers = $1,
            riasec_scores = $2,
            riasec_top3 = $3,
            riasec_vector = $4,
            riasec_completed = TRUE,
            riasec_timestamp = NOW()
        WHERE id = $5
        "#,
    )
    .bind(serde_json::to_value(answers).map_err(anyhow::Error::from)?)
    .bind(serde_json::to_value(&result.scores).map_err(anyhow::Error::from)?)
    .bind(&top3)
    .bind(&result.riasec_vector)
    .bind(user_id)
    .execute(pool)
    .await?;

    info!("RIASEC results saved for user {user_id}");
    Ok(())
}
