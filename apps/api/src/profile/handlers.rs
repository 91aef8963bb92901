//! Axum route handlers for student profiles.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::store::find_by_username;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::marks::store::list_marks;
use crate::models::mark::MarkRow;
use crate::models::user::User;
use crate::profile::images::{parse_data_url, presigned_url, upload_image, ImageKind};
use crate::profile::store::{patch_profile, replace_profile, set_image_key, ProfileFields};
use crate::riasec::handlers::{top_trait_cards, TraitCard};
use crate::riasec::store::RiasecRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub bio: String,
    pub location: String,
    pub phone: String,
    pub is_admin: bool,
    pub marks_completed: bool,
    pub riasec_completed: bool,
    pub riasec_top3: Vec<String>,
    pub marks_count: usize,
    pub created_at: DateTime<Utc>,
}

impl ProfileView {
    pub fn new(user: &User, marks_count: usize) -> Self {
        Self {
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            phone: user.phone.clone(),
            is_admin: user.is_admin,
            marks_completed: user.marks_completed,
            riasec_completed: user.riasec_completed,
            riasec_top3: user.riasec_top3.clone().unwrap_or_default(),
            marks_count,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileImages {
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UploadImageRequest {
    #[serde(rename = "type")]
    pub kind: ImageKind,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub success: bool,
    pub key: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct PublicProfileResponse {
    pub profile: ProfileView,
    pub images: ProfileImages,
    pub marks: Vec<MarkRow>,
    pub riasec: Option<RiasecRecord>,
    pub top_traits: Vec<TraitCard>,
}

async fn profile_images(state: &AppState, user: &User) -> Result<ProfileImages, AppError> {
    let bucket = &state.config.s3_bucket;
    let profile_image = match &user.profile_image_key {
        Some(key) => Some(presigned_url(&state.s3, bucket, key).await?),
        None => None,
    };
    let cover_image = match &user.cover_image_key {
        Some(key) => Some(presigned_url(&state.s3, bucket, key).await?),
        None => None,
    };
    Ok(ProfileImages {
        profile_image,
        cover_image,
    })
}

async fn profile_view(state: &AppState, user: &User) -> Result<ProfileView, AppError> {
    let marks = list_marks(&state.db, user.id).await?;
    Ok(ProfileView::new(user, marks.len()))
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileView>, AppError> {
    Ok(Json(profile_view(&state, &auth.user).await?))
}

/// PATCH /api/v1/profile
pub async fn handle_patch_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(fields): Json<ProfileFields>,
) -> Result<Json<ProfileView>, AppError> {
    if fields.provided().is_empty() {
        return Err(AppError::Validation("No profile fields to update".to_string()));
    }
    let user = patch_profile(&state.db, auth.user.id, &fields).await?;
    info!("Profile updated for {}", user.username);
    Ok(Json(profile_view(&state, &user).await?))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(fields): Json<ProfileFields>,
) -> Result<Json<ProfileView>, AppError> {
    let user = replace_profile(&state.db, auth.user.id, &fields).await?;
    info!("Profile replaced for {}", user.username);
    Ok(Json(profile_view(&state, &user).await?))
}

/// POST /api/v1/profile/images
pub async fn handle_upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UploadImageRequest>,
) -> Result<Json<UploadImageResponse>, AppError> {
    let image = parse_data_url(&req.image)?;
    let bucket = &state.config.s3_bucket;

    let key = upload_image(&state.s3, bucket, auth.user.id, req.kind, image).await?;
    set_image_key(&state.db, auth.user.id, req.kind, &key).await?;
    let url = presigned_url(&state.s3, bucket, &key).await?;

    Ok(Json(UploadImageResponse {
        success: true,
        key,
        url,
    }))
}

/// GET /api/v1/profile/images
pub async fn handle_get_images(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileImages>, AppError> {
    Ok(Json(profile_images(&state, &auth.user).await?))
}

/// GET /api/v1/public/profiles/:username
pub async fn handle_public_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PublicProfileResponse>, AppError> {
    let user = find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found!".to_string()))?;

    let marks = list_marks(&state.db, user.id).await?;
    let riasec = RiasecRecord::from_user(&user);
    let top_traits = riasec.as_ref().map(top_trait_cards).unwrap_or_default();

    Ok(Json(PublicProfileResponse {
        profile: ProfileView::new(&user, marks.len()),
        images: profile_images(&state, &user).await?,
        marks,
        riasec,
        top_traits,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riasec::store::tests::sample_user;

    #[test]
    fn test_view_hides_password_and_keys() {
        let mut user = sample_user();
        user.password_hash = "$argon2id$secret".into();
        user.profile_image_key = Some("profiles/x/profile-1.png".into());

        let value = serde_json::to_value(ProfileView::new(&user, 4)).unwrap();
        assert_eq!(value["username"], "asha");
        assert_eq!(value["marks_count"], 4);
        assert_eq!(value["riasec_top3"][0], "I");
        assert!(value.get("password_hash").is_none());
        assert!(value.get("profile_image_key").is_none());
    }

    #[test]
    fn test_upload_request_uses_type_field() {
        let req: UploadImageRequest =
            serde_json::from_str(r#"{"type": "cover", "image": "data:image/png;base64,AA=="}"#)
                .unwrap();
        assert_eq!(req.kind, ImageKind::Cover);
    }
}
