use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::User;
use crate::profile::images::ImageKind;

/// Editable profile fields. Absent fields deserialize as None.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileFields {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl ProfileFields {
    /// Keeps only the fields that carry a value, trimmed.
    pub fn provided(&self) -> ProfileFields {
        ProfileFields {
            display_name: non_empty(&self.display_name).map(str::to_string),
            email: non_empty(&self.email).map(str::to_string),
            phone: non_empty(&self.phone).map(str::to_string),
            location: non_empty(&self.location).map(str::to_string),
            bio: non_empty(&self.bio).map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.location.is_none()
            && self.bio.is_none()
    }
}

/// Updates only the non-empty fields.
pub async fn patch_profile(
    pool: &PgPool,
    user_id: Uuid,
    fields: &ProfileFields,
) -> Result<User, AppError> {
    let fields = fields.provided();
    Ok(sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET display_name = COALESCE($1, display_name),
            email = COALESCE($2, email),
            phone = COALESCE($3, phone),
            location = COALESCE($4, location),
            bio = COALESCE($5, bio)
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(fields.display_name)
    .bind(fields.email)
    .bind(fields.phone)
    .bind(fields.location)
    .bind(fields.bio)
    .bind(user_id)
    .fetch_one(pool)
    .await?)
}

/// Overwrites every field; absent text fields become empty and an absent email is cleared.
pub async fn replace_profile(
    pool: &PgPool,
    user_id: Uuid,
    fields: &ProfileFields,
) -> Result<User, AppError> {
    let text = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().to_string();
    Ok(sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET display_name = $1, email = $2, phone = $3, location = $4, bio = $5
        WHERE id = $6
        RETURNING *
        "#,
    )
    .bind(text(&fields.display_name))
    .bind(non_empty(&fields.email))
    .bind(text(&fields.phone))
    .bind(text(&fields.location))
    .bind(text(&fields.bio))
    .bind(user_id)
    .fetch_one(pool)
    .await?)
}

pub async fn set_image_key(
    pool: &PgPool,
    user_id: Uuid,
    kind: ImageKind,
    key: &str,
) -> Result<(), AppError> {
    let sql = match kind {
        ImageKind::Profile => "UPDATE users SET profile_image_key = $1 WHERE id = $2",
        ImageKind::Cover => "UPDATE users SET cover_image_key = $1 WHERE id = $2",
    };
    sqlx::query(sql).bind(key).bind(user_id).execute(pool).await?;
    Ok(())
}
