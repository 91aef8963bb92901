//! Axum route handlers for the home summary and the RIASEC dashboard.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::onboarding::{require_onboarded, NextStep};
use crate::auth::AuthUser;
use crate::dashboard::stats::{home_stats, radar_series, HomeStats, RadarSeries};
use crate::errors::AppError;
use crate::marks::store::list_marks;
use crate::models::mark::MarkRow;
use crate::riasec::handlers::{top_trait_cards, TraitCard};
use crate::riasec::store::RiasecRecord;
use crate::riasec::traits::trait_name;
use crate::state::AppState;

const MARKS_REQUIRED: &str = "Please complete your marks entry first!";
const RIASEC_REQUIRED: &str = "Please complete the RIASEC assessment first!";

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub username: String,
    pub stats: HomeStats,
    pub next_step: NextStep,
    pub riasec: Option<RiasecRecord>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub scores: std::collections::BTreeMap<String, f64>,
    pub top3: Vec<String>,
    pub top3_names: Vec<&'static str>,
    pub timestamp: Option<DateTime<Utc>>,
    pub radar: RadarSeries,
    pub marks: Vec<MarkRow>,
    pub top_traits: Vec<TraitCard>,
}

/// GET /api/v1/home
pub async fn handle_home(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<HomeResponse>, AppError> {
    let marks = list_marks(&state.db, auth.user.id).await?;
    Ok(Json(HomeResponse {
        stats: home_stats(&auth.user, &marks),
        next_step: NextStep::for_user(&auth.user),
        riasec: RiasecRecord::from_user(&auth.user),
        username: auth.user.username,
    }))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<DashboardResponse>, AppError> {
    require_onboarded(&auth.user, MARKS_REQUIRED, RIASEC_REQUIRED)?;
    let record = RiasecRecord::from_user(&auth.user).ok_or_else(|| AppError::OnboardingIncomplete {
        message: RIASEC_REQUIRED.to_string(),
        next_step: NextStep::Survey,
    })?;

    let marks = list_marks(&state.db, auth.user.id).await?;

    Ok(Json(DashboardResponse {
        radar: radar_series(&record),
        top_traits: top_trait_cards(&record),
        top3_names: record.top3.iter().map(|code| trait_name(code)).collect(),
        marks,
        scores: record.scores,
        top3: record.top3,
        timestamp: record.timestamp,
    }))
}
