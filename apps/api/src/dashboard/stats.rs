//! Pure summary computations behind the home and dashboard endpoints.

use serde::Serialize;

use crate::marks::store::average_percentage;
use crate::marks::validation::round_to;
use crate::models::mark::MarkRow;
use crate::models::user::User;
use crate::riasec::store::RiasecRecord;
use crate::riasec::RiasecTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepStatus {
    Done,
    Pending,
}

impl StepStatus {
    fn from_flag(done: bool) -> Self {
        if done {
            StepStatus::Done
        } else {
            StepStatus::Pending
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeStats {
    pub completion: u8,
    pub subjects_count: usize,
    pub average_score: f64,
    pub marks_status: StepStatus,
    pub riasec_status: StepStatus,
}

/// 50 points per finished onboarding step.
pub fn completion_percent(marks_completed: bool, riasec_completed: bool) -> u8 {
    50 * (marks_completed as u8) + 50 * (riasec_completed as u8)
}

pub fn home_stats(user: &User, marks: &[MarkRow]) -> HomeStats {
    HomeStats {
        completion: completion_percent(user.marks_completed, user.riasec_completed),
        subjects_count: marks.len(),
        average_score: round_to(average_percentage(marks), 2),
        marks_status: StepStatus::from_flag(user.marks_completed),
        riasec_status: StepStatus::from_flag(user.riasec_completed),
    }
}

/// Radar chart series: one axis per trait in RIASEC order, scores as percentages.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RadarSeries {
    pub labels: Vec<&'static str>,
    pub values: Vec<f64>,
    pub range: [f64; 2],
}

pub fn radar_series(record: &RiasecRecord) -> RadarSeries {
    RadarSeries {
        labels: RiasecTrait::ALL.iter().map(|t| t.name()).collect(),
        values: RiasecTrait::ALL
            .iter()
            .map(|t| round_to(record.score(t.code()) * 100.0, 1))
            .collect(),
        range: [0.0, 100.0],
    }
}
