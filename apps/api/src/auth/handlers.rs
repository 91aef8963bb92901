//! Axum route handlers for registration and login.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::onboarding::NextStep;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::store::{find_by_username, insert_user, NewUser, DEFAULT_BIO};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub next_step: NextStep,
    pub message: &'static str,
}

/// Checks a registration form before anything touches the database.
pub fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password required!".to_string(),
        ));
    }
    if req.password != req.confirm_password {
        return Err(AppError::Validation("Passwords do not match!".to_string()));
    }
    Ok(())
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    validate_registration(&req)?;
    let username = req.username.trim();

    if find_by_username(&state.db, username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists!".to_string()));
    }

    let password_hash = hash_password(&req.password)?;
    let email = req.email.as_deref().map(str::trim).filter(|e| !e.is_empty());
    let user = insert_user(
        &state.db,
        NewUser {
            username,
            password_hash: &password_hash,
            email,
            display_name: username,
            bio: DEFAULT_BIO,
            is_admin: false,
            onboarded: false,
        },
    )
    .await?;

    info!("Registered user {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            username: user.username,
            message: "Registered successfully! Please login.",
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password required!".to_string(),
        ));
    }

    let user = find_by_username(&state.db, req.username.trim())
        .await?
        .filter(|u| verify_password(&req.password, &u.password_hash))
        .ok_or(AppError::InvalidCredentials)?;

    let token = state.sessions.create(user.id).await?;
    let next_step = NextStep::for_user(&user);

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        next_step,
        message: next_step.login_message(),
    }))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, AppError> {
    state.sessions.revoke(&auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: None,
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(matches!(
            validate_registration(&form("  ", "pw", "pw")),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_registration(&form("asha", "", "")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let err = validate_registration(&form("asha", "one", "two")).unwrap_err();
        assert!(err.to_string().contains("Passwords do not match"));
    }

    #[test]
    fn test_valid_form_accepted() {
        assert!(validate_registration(&form("asha", "pw", "pw")).is_ok());
    }
}
