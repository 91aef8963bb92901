use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::errors::AppError;
use crate::models::user::User;
use crate::riasec::RiasecTrait;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SiteCounts {
    pub users: i64,
    pub admins: i64,
    pub marks_completed: i64,
    pub riasec_completed: i64,
    pub total_marks: i64,
    pub average_percentage: f64,
    pub chat_messages: i64,
    pub courses: i64,
    pub jobs: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminStats {
    #[serde(flatten)]
    pub counts: SiteCounts,
    /// How many students have each trait as their top RIASEC trait.
    pub primary_traits: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminSummary {
    pub username: String,
    pub email: Option<String>,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

pub async fn site_counts(pool: &PgPool) -> Result<SiteCounts, AppError> {
    Ok(sqlx::query_as::<_, SiteCounts>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users) AS users,
            (SELECT COUNT(*) FROM users WHERE is_admin) AS admins,
            (SELECT COUNT(*) FROM users WHERE marks_completed) AS marks_completed,
            (SELECT COUNT(*) FROM users WHERE riasec_completed) AS riasec_completed,
            (SELECT COUNT(*) FROM marks) AS total_marks,
            (SELECT COALESCE(ROUND(AVG(percentage)::numeric, 2), 0)::float8 FROM marks)
                AS average_percentage,
            (SELECT COUNT(*) FROM chat_messages) AS chat_messages,
            (SELECT COUNT(*) FROM courses) AS courses,
            (SELECT COUNT(*) FROM jobs) AS jobs
        "#,
    )
    .fetch_one(pool)
    .await?)
}

/// Every trait appears in the result, unknown codes are dropped.
pub fn trait_distribution(rows: Vec<(String, i64)>) -> BTreeMap<String, i64> {
    let mut distribution: BTreeMap<String, i64> = RiasecTrait::ALL
        .iter()
        .map(|t| (t.code().to_string(), 0))
        .collect();
    for (code, count) in rows {
        if let Some(t) = RiasecTrait::from_code(&code) {
            *distribution.entry(t.code().to_string()).or_default() += count;
        }
    }
    distribution
}

pub async fn admin_stats(pool: &PgPool) -> Result<AdminStats, AppError> {
    let counts = site_counts(pool).await?;
    let rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT riasec_top3[1] AS code, COUNT(*) AS n
        FROM users
        WHERE riasec_completed AND cardinality(riasec_top3) > 0
        GROUP BY riasec_top3[1]
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(AdminStats {
        counts,
        primary_traits: trait_distribution(rows),
    })
}

pub async fn list_admins(pool: &PgPool) -> Result<Vec<AdminSummary>, AppError> {
    Ok(sqlx::query_as::<_, AdminSummary>(
        "SELECT username, email, display_name, created_at FROM users WHERE is_admin ORDER BY username",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn set_admin_flag(pool: &PgPool, username: &str, is_admin: bool) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("UPDATE users SET is_admin = $1 WHERE username = $2 RETURNING *")
        .bind(is_admin)
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{username}' not found!")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_covers_every_trait() {
        let distribution = trait_distribution(vec![("I".into(), 3), ("A".into(), 1)]);
        assert_eq!(distribution.len(), 6);
        assert_eq!(distribution["I"], 3);
        assert_eq!(distribution["A"], 1);
        assert_eq!(distribution["C"], 0);
    }

    #[test]
    fn test_distribution_normalises_and_drops_unknown_codes() {
        let distribution = trait_distribution(vec![("s".into(), 2), ("X".into(), 9)]);
        assert_eq!(distribution["S"], 2);
        assert!(!distribution.contains_key("X"));
        assert_eq!(distribution.values().sum::<i64>(), 2);
    }

    #[test]
    fn test_stats_flatten_counts() {
        let stats = AdminStats {
            counts: SiteCounts {
                users: 4,
                admins: 1,
                marks_completed: 3,
                riasec_completed: 2,
                total_marks: 12,
                average_percentage: 71.25,
                chat_messages: 40,
                courses: 120,
                jobs: 35,
            },
            primary_traits: trait_distribution(vec![]),
        };
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["users"], 4);
        assert_eq!(value["average_percentage"], 71.25);
        assert_eq!(value["primary_traits"]["R"], 0);
    }
}
