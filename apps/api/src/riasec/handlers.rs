//! Axum route handlers for the RIASEC assessment.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::auth::onboarding::{require_marks, NextStep};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::riasec::questions::{Question, QUESTIONS};
use crate::riasec::scoring::{calculate_riasec_scores, count_valid_answers, sanitize_answers};
use crate::riasec::store::{save_riasec_results, RiasecRecord};
use crate::riasec::traits::{trait_description, TraitDescription};
use crate::riasec::RiasecTrait;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SurveyResponse {
    pub questions: &'static [Question],
    /// Previous results, so the student can review or retake.
    pub previous: Option<RiasecRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitSurveyRequest {
    #[serde(default)]
    pub answers: HashMap<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct SubmitSurveyResponse {
    pub success: bool,
    pub valid_answers: usize,
    pub top3: Vec<RiasecTrait>,
    pub next_step: NextStep,
}

#[derive(Debug, Serialize)]
pub struct TraitCard {
    pub code: String,
    pub score: f64,
    #[serde(flatten)]
    pub description: &'static TraitDescription,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub results: RiasecRecord,
    pub top_traits: Vec<TraitCard>,
}

/// Reference cards for a record's top traits, in rank order.
pub fn top_trait_cards(record: &RiasecRecord) -> Vec<TraitCard> {
    record
        .top3
        .iter()
        .map(|code| TraitCard {
            code: code.clone(),
            score: record.score(code),
            description: trait_description(code),
        })
        .collect()
}

/// GET /api/v1/survey
pub async fn handle_get_survey(auth: AuthUser) -> Json<SurveyResponse> {
    Json(SurveyResponse {
        questions: QUESTIONS,
        previous: RiasecRecord::from_user(&auth.user),
    })
}

/// POST /api/v1/survey
pub async fn handle_submit_survey(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SubmitSurveyRequest>,
) -> Result<Json<SubmitSurveyResponse>, AppError> {
    let valid_answers = count_valid_answers(&req.answers);
    info!(
        "Survey submission from {}: {} answers, {} valid",
        auth.user.username,
        req.answers.len(),
        valid_answers
    );

    let result = calculate_riasec_scores(&req.answers);
    save_riasec_results(
        &state.db,
        auth.user.id,
        &sanitize_answers(&req.answers),
        &result,
    )
    .await?;

    Ok(Json(SubmitSurveyResponse {
        success: true,
        valid_answers,
        top3: result.top3,
        next_step: NextStep::for_flags(auth.user.marks_completed, true),
    }))
}

/// GET /api/v1/riasec/results
pub async fn handle_get_results(auth: AuthUser) -> Result<Json<ResultsResponse>, AppError> {
    require_marks(&auth.user, "Please complete your marks entry first!")?;

    let results = RiasecRecord::from_user(&auth.user).ok_or_else(|| {
        AppError::OnboardingIncomplete {
            message: "Please complete the RIASEC assessment first.".to_string(),
            next_step: NextStep::Survey,
        }
    })?;
    let top_traits = top_trait_cards(&results);

    Ok(Json(ResultsResponse {
        results,
        top_traits,
    }))
}

/// GET /api/v1/riasec/traits/:code
pub async fn handle_get_trait(Path(code): Path<String>) -> Json<&'static TraitDescription> {
    Json(trait_description(&code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riasec::store::tests::sample_user;

    #[test]
    fn test_top_trait_cards_follow_rank() {
        let record = RiasecRecord::from_user(&sample_user()).unwrap();
        let cards = top_trait_cards(&record);
        let names: Vec<_> = cards.iter().map(|c| c.description.name).collect();
        assert_eq!(names, vec!["Investigative", "Artistic", "Realistic"]);
        assert!((cards[0].score - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_card_flattens_description() {
        let record = RiasecRecord::from_user(&sample_user()).unwrap();
        let value = serde_json::to_value(&top_trait_cards(&record)[0]).unwrap();
        assert_eq!(value["code"], "I");
        assert_eq!(value["name"], "Investigative");
        assert!(value["skills"].is_array());
    }
}
