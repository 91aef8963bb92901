//! Axum route handlers for the course graph and playlists.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::courses::playlist::{add_to_playlist, list_playlist, remove_from_playlist};
use crate::courses::search::{search_courses, search_jobs, COURSE_TOP_K, JOB_TOP_K};
use crate::courses::store::{dependency_tree, get_course};
use crate::courses::tree::{clamp_depth, DependencyTree};
use crate::errors::AppError;
use crate::models::course::{CourseHit, JobHit, PlaylistEntry};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct TreeQuery {
    pub depth: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TreeResponse {
    #[serde(flatten)]
    pub tree: DependencyTree,
    pub depth: u32,
    pub ascii: String,
}

#[derive(Debug, Deserialize)]
pub struct AddPlaylistRequest {
    pub course_code: String,
}

#[derive(Debug, Serialize)]
pub struct AddPlaylistResponse {
    pub course_code: String,
    pub added: bool,
}

/// GET /api/v1/courses/search?q=
pub async fn handle_search_courses(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<CourseHit>>, AppError> {
    Ok(Json(search_courses(&state.db, &params.q, COURSE_TOP_K).await?))
}

/// GET /api/v1/jobs/search?q=
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<JobHit>>, AppError> {
    Ok(Json(search_jobs(&state.db, &params.q, JOB_TOP_K).await?))
}

/// GET /api/v1/courses/:code
pub async fn handle_get_course(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(code): Path<String>,
) -> Result<Json<CourseHit>, AppError> {
    get_course(&state.db, &code)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Course {code} not found")))
}

/// GET /api/v1/courses/:code/tree?depth=
pub async fn handle_course_tree(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(code): Path<String>,
    Query(params): Query<TreeQuery>,
) -> Result<Json<TreeResponse>, AppError> {
    let depth = clamp_depth(params.depth);
    let (tree, titles) = dependency_tree(&state.db, &code, depth)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {code} not found")))?;
    let ascii = tree.render(&titles);
    Ok(Json(TreeResponse { tree, depth, ascii }))
}

/// GET /api/v1/playlist
pub async fn handle_get_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<PlaylistEntry>>, AppError> {
    Ok(Json(list_playlist(&state.db, auth.user.id).await?))
}

/// POST /api/v1/playlist
pub async fn handle_add_to_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddPlaylistRequest>,
) -> Result<(StatusCode, Json<AddPlaylistResponse>), AppError> {
    if req.course_code.trim().is_empty() {
        return Err(AppError::Validation("course_code cannot be empty".to_string()));
    }
    let added = add_to_playlist(&state.db, auth.user.id, &req.course_code).await?;
    let status = if added { StatusCode::CREATED } else { StatusCode::OK };
    Ok((
        status,
        Json(AddPlaylistResponse {
            course_code: req.course_code.trim().to_string(),
            added,
        }),
    ))
}

/// DELETE /api/v1/playlist/:code
pub async fn handle_remove_from_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    remove_from_playlist(&state.db, auth.user.id, &code).await?;
    Ok(StatusCode::NO_CONTENT)
}
