//! Axum route handlers for marks entry.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::onboarding::NextStep;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::marks::store::{
    delete_mark, insert_mark, list_marks, set_marks_completed, update_mark, NewMark,
};
use crate::marks::validation::{checked_percentage, normalize_subject};
use crate::marks::DEFAULT_SUBJECTS;
use crate::models::mark::MarkRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddMarkRequest {
    pub subject: String,
    pub marks_scored: f64,
    pub total_marks: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMarkRequest {
    pub marks_scored: f64,
    pub total_marks: f64,
}

#[derive(Debug, Serialize)]
pub struct MarksResponse {
    pub marks: Vec<MarkRow>,
    pub marks_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct FinishResponse {
    pub next_step: NextStep,
    pub message: &'static str,
}

impl FinishResponse {
    /// Finishing marks always hands over to the survey, even on a re-finish.
    fn survey() -> Self {
        Self {
            next_step: NextStep::Survey,
            message: "Great! Now let's complete the RIASEC assessment to discover your career interests.",
        }
    }
}

/// GET /api/v1/marks/subjects
pub async fn handle_default_subjects() -> Json<&'static [&'static str]> {
    Json(DEFAULT_SUBJECTS)
}

/// GET /api/v1/marks
pub async fn handle_list_marks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MarksResponse>, AppError> {
    let marks = list_marks(&state.db, auth.user.id).await?;
    Ok(Json(MarksResponse {
        marks,
        marks_completed: auth.user.marks_completed,
    }))
}

/// POST /api/v1/marks
pub async fn handle_add_mark(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddMarkRequest>,
) -> Result<(StatusCode, Json<MarkRow>), AppError> {
    let subject = normalize_subject(&req.subject)?;
    let percentage = checked_percentage(req.marks_scored, req.total_marks)?;

    let row = insert_mark(
        &state.db,
        NewMark {
            user_id: auth.user.id,
            subject: &subject,
            marks_scored: req.marks_scored,
            total_marks: req.total_marks,
            percentage,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/marks/:id
pub async fn handle_update_mark(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(mark_id): Path<Uuid>,
    Json(req): Json<UpdateMarkRequest>,
) -> Result<Json<MarkRow>, AppError> {
    let percentage = checked_percentage(req.marks_scored, req.total_marks)?;
    let row = update_mark(
        &state.db,
        auth.user.id,
        mark_id,
        req.marks_scored,
        req.total_marks,
        percentage,
    )
    .await?;
    Ok(Json(row))
}

/// DELETE /api/v1/marks/:id
pub async fn handle_delete_mark(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(mark_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    delete_mark(&state.db, auth.user.id, mark_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/marks/finish
///
/// Closes the marks step. At least one subject must be recorded.
pub async fn handle_finish_marks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<FinishResponse>, AppError> {
    let marks = list_marks(&state.db, auth.user.id).await?;
    if marks.is_empty() {
        return Err(AppError::Validation(
            "Please add at least one subject's marks before continuing!".to_string(),
        ));
    }

    set_marks_completed(&state.db, auth.user.id).await?;

    Ok(Json(FinishResponse::survey()))
}
