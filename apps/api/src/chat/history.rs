use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::chat::{ChatTurn, Role};
use crate::errors::AppError;
use crate::models::chat::ChatMessageRow;

pub async fn save_chat_message(
    pool: &PgPool,
    user_id: Uuid,
    role: Role,
    content: &str,
    is_code: bool,
) -> Result<ChatMessageRow, AppError> {
    Ok(sqlx::query_as::<_, ChatMessageRow>(
        r#"
        INSERT INTO chat_messages (id, user_id, role, content, is_code, created_at)
        VALUES ($1, $2, $3, $4, $5, clock_timestamp())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(role.as_str())
    .bind(content)
    .bind(is_code)
    .fetch_one(pool)
    .await?)
}

/// The user's conversation, oldest first.
pub async fn load_chat_history(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ChatMessageRow>, AppError> {
    Ok(sqlx::query_as::<_, ChatMessageRow>(
        "SELECT * FROM chat_messages WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn clear_chat_history(pool: &PgPool, user_id: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM chat_messages WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    info!(
        "Cleared {} chat messages for user {user_id}",
        result.rows_affected()
    );
    Ok(result.rows_affected())
}

pub fn to_turns(rows: &[ChatMessageRow]) -> Vec<ChatTurn> {
    rows.iter()
        .map(|r| ChatTurn {
            role: Role::parse(&r.role),
            content: r.content.clone(),
            is_code: r.is_code,
        })
        .collect()
}
