use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::mark::MarkRow;

pub struct NewMark<'a> {
    pub user_id: Uuid,
    pub subject: &'a str,
    pub marks_scored: f64,
    pub total_marks: f64,
    pub percentage: f64,
}

fn duplicate_subject(subject: &str) -> AppError {
    AppError::Conflict(format!(
        "Marks for \"{subject}\" already exist! Please edit the existing entry."
    ))
}

/// Inserts a mark; one entry per subject per user.
pub async fn insert_mark(pool: &PgPool, new: NewMark<'_>) -> Result<MarkRow, AppError> {
    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM marks WHERE user_id = $1 AND subject = $2")
            .bind(new.user_id)
            .bind(new.subject)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(duplicate_subject(new.subject));
    }

    let result = sqlx::query_as::<_, MarkRow>(
        r#"
        INSERT INTO marks (id, user_id, subject, marks_scored, total_marks, percentage)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(new.subject)
    .bind(new.marks_scored)
    .bind(new.total_marks)
    .bind(new.percentage)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => {
            info!("Saved marks for {} (user {})", row.subject, row.user_id);
            Ok(row)
        }
        // Lost a race with a concurrent insert of the same subject.
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(duplicate_subject(new.subject))
        }
        Err(e) => Err(e.into()),
    }
}

/// All marks for a user, most recently touched first.
pub async fn list_marks(pool: &PgPool, user_id: Uuid) -> Result<Vec<MarkRow>, AppError> {
    Ok(sqlx::query_as::<_, MarkRow>(
        "SELECT * FROM marks WHERE user_id = $1 ORDER BY updated_at DESC, subject ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn update_mark(
    pool: &PgPool,
    user_id: Uuid,
    mark_id: Uuid,
    marks_scored: f64,
    total_marks: f64,
    percentage: f64,
) -> Result<MarkRow, AppError> {
    sqlx::query_as::<_, MarkRow>(
        r#"
        UPDATE marks
        SET marks_scored = $1, total_marks = $2, percentage = $3, updated_at = NOW()
        WHERE id = $4 AND user_id = $5
        RETURNING *
        "#,
    )
    .bind(marks_scored)
    .bind(total_marks)
    .bind(percentage)
    .bind(mark_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Mark {mark_id} not found")))
}

pub async fn delete_mark(pool: &PgPool, user_id: Uuid, mark_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM marks WHERE id = $1 AND user_id = $2")
        .bind(mark_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Mark {mark_id} not found")));
    }
    Ok(())
}

pub async fn set_marks_completed(pool: &PgPool, user_id: Uuid) -> Result<(), AppError> {
    sqlx::query("UPDATE users SET marks_completed = TRUE WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Mean percentage across marks; zero when there are none.
pub fn average_percentage(marks: &[MarkRow]) -> f64 {
    if marks.is_empty() {
        return 0.0;
    }
    marks.iter().map(|m| m.percentage).sum::<f64>() / marks.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn mark(subject: &str, percentage: f64) -> MarkRow {
        MarkRow {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            subject: subject.to_string(),
            marks_scored: percentage,
            total_marks: 100.0,
            percentage,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        assert_eq!(average_percentage(&[]), 0.0);
    }

    #[test]
    fn test_average_percentage() {
        let marks = vec![mark("Physics", 80.0), mark("Biology", 60.0), mark("English", 70.0)];
        assert!((average_percentage(&marks) - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_message_names_subject() {
        let err = duplicate_subject("Physics");
        assert!(err.to_string().contains("\"Physics\" already exist"));
    }
}
