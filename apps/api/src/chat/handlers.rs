//! Axum route handlers for the advisor chat.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::onboarding::require_onboarded;
use crate::auth::AuthUser;
use crate::chat::history::{clear_chat_history, load_chat_history, save_chat_message, to_turns};
use crate::chat::query::process_user_query;
use crate::chat::responder::generate_response;
use crate::chat::Role;
use crate::errors::AppError;
use crate::models::chat::ChatMessageRow;
use crate::models::user::User;
use crate::state::AppState;

const MARKS_REQUIRED: &str =
    "Please complete your marks entry first to get personalized recommendations!";
const RIASEC_REQUIRED: &str =
    "Please complete the RIASEC assessment to get career-specific advice!";

#[derive(Debug, Serialize)]
pub struct ChatHistoryResponse {
    pub messages: Vec<ChatMessageRow>,
    pub llm_available: bool,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub response: String,
    pub courses_count: usize,
    pub jobs_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
    pub deleted: u64,
}

fn require_chat_access(user: &User) -> Result<(), AppError> {
    require_onboarded(user, MARKS_REQUIRED, RIASEC_REQUIRED)
}

/// GET /api/v1/chat
pub async fn handle_get_chat(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ChatHistoryResponse>, AppError> {
    require_chat_access(&auth.user)?;
    let messages = load_chat_history(&state.db, auth.user.id).await?;
    Ok(Json(ChatHistoryResponse {
        messages,
        llm_available: state.llm.is_some(),
    }))
}

/// POST /api/v1/chat/send
pub async fn handle_send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    require_chat_access(&auth.user)?;

    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }

    let user_id = auth.user.id;
    let institution = state.config.institution_name.as_str();

    let results = process_user_query(&state.db, message, institution).await;

    save_chat_message(&state.db, user_id, Role::User, message, false).await?;
    let history = to_turns(&load_chat_history(&state.db, user_id).await?);

    let response = generate_response(
        &results,
        message,
        state.llm.as_deref(),
        &history,
        institution,
    )
    .await;

    save_chat_message(&state.db, user_id, Role::Assistant, &response, false).await?;

    info!(
        "Chat reply for {}: {:?}, {} courses, {} jobs",
        auth.user.username,
        results.search_type,
        results.courses.len(),
        results.jobs.len()
    );

    Ok(Json(SendMessageResponse {
        response,
        courses_count: results.courses.len(),
        jobs_count: results.jobs.len(),
    }))
}

/// POST /api/v1/chat/clear
pub async fn handle_clear_chat(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ClearResponse>, AppError> {
    require_chat_access(&auth.user)?;
    let deleted = clear_chat_history(&state.db, auth.user.id).await?;
    Ok(Json(ClearResponse {
        success: true,
        deleted,
    }))
}
