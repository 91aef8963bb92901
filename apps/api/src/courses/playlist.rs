use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::course::PlaylistEntry;

pub async fn list_playlist(pool: &PgPool, user_id: Uuid) -> Result<Vec<PlaylistEntry>, AppError> {
    Ok(sqlx::query_as::<_, PlaylistEntry>(
        r#"
        SELECT c.course_code, c.course_title, c.subject_area, p.added_at
        FROM playlist_courses p
        JOIN courses c ON c.course_code = p.course_code
        WHERE p.user_id = $1
        ORDER BY p.added_at ASC, c.course_code
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Saves a course to the user's playlist. Adding a course twice is a no-op.
/// Returns false when the course was already saved.
pub async fn add_to_playlist(
    pool: &PgPool,
    user_id: Uuid,
    course_code: &str,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO playlist_courses (user_id, course_code)
        SELECT $1, c.course_code FROM courses c WHERE UPPER(c.course_code) = UPPER($2)
        ON CONFLICT (user_id, course_code) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(course_code.trim())
    .execute(pool)
    .await?;

    if result.rows_affected() > 0 {
        return Ok(true);
    }

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM courses WHERE UPPER(course_code) = UPPER($1))",
    )
    .bind(course_code.trim())
    .fetch_one(pool)
    .await?;
    if !exists {
        return Err(AppError::NotFound(format!("Course {course_code} not found")));
    }
    Ok(false)
}

pub async fn remove_from_playlist(
    pool: &PgPool,
    user_id: Uuid,
    course_code: &str,
) -> Result<(), AppError> {
    let result = sqlx::query(
        "DELETE FROM playlist_courses WHERE user_id = $1 AND UPPER(course_code) = UPPER($2)",
    )
    .bind(user_id)
    .bind(course_code.trim())
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Course {course_code} is not in your playlist"
        )));
    }
    Ok(())
}
