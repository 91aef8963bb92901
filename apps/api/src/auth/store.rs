use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;

pub const DEFAULT_BIO: &str = "New student";

/// Fields for a freshly created account.
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: Option<&'a str>,
    pub display_name: &'a str,
    pub bio: &'a str,
    pub is_admin: bool,
    /// Admin accounts skip onboarding.
    pub onboarded: bool,
}

pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    Ok(
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
    Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

/// Inserts a user; a taken username surfaces as `AppError::Conflict`.
pub async fn insert_user(pool: &PgPool, new: NewUser<'_>) -> Result<User, AppError> {
    let result = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users
            (id, username, password_hash, email, display_name, bio, location, phone,
             is_admin, marks_completed, riasec_completed)
        VALUES ($1, $2, $3, $4, $5, $6, '', '', $7, $8, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.username)
    .bind(new.password_hash)
    .bind(new.email)
    .bind(new.display_name)
    .bind(new.bio)
    .bind(new.is_admin)
    .bind(new.onboarded)
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(AppError::Conflict("Username already exists!".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
