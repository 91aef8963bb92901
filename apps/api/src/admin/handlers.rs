//! Axum route handlers for the admin console.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::admin::store::{admin_stats, list_admins, set_admin_flag, AdminStats, AdminSummary};
use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetAdminRequest {
    pub is_admin: bool,
}

#[derive(Debug, Serialize)]
pub struct SetAdminResponse {
    pub username: String,
    pub is_admin: bool,
}

/// GET /api/v1/admin/stats
pub async fn handle_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<AdminStats>, AppError> {
    Ok(Json(admin_stats(&state.db).await?))
}

/// GET /api/v1/admin/admins
pub async fn handle_list_admins(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<AdminSummary>>, AppError> {
    Ok(Json(list_admins(&state.db).await?))
}

/// PATCH /api/v1/admin/users/:username
pub async fn handle_set_admin(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(username): Path<String>,
    Json(req): Json<SetAdminRequest>,
) -> Result<Json<SetAdminResponse>, AppError> {
    if !req.is_admin && admin.username == username {
        return Err(AppError::Validation(
            "You cannot remove your own admin access".to_string(),
        ));
    }

    let user = set_admin_flag(&state.db, &username, req.is_admin).await?;
    info!(
        "{} set is_admin={} for '{}'",
        admin.username, user.is_admin, user.username
    );

    Ok(Json(SetAdminResponse {
        username: user.username,
        is_admin: user.is_admin,
    }))
}
