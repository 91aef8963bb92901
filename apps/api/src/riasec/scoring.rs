use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::riasec::questions::{Question, QUESTIONS};
use crate::riasec::RiasecTrait;

/// Output of scoring one survey submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiasecResult {
    /// Normalized so the six scores sum to 1 (all zero if nothing was answered yes).
    pub scores: BTreeMap<RiasecTrait, f64>,
    pub top3: Vec<RiasecTrait>,
    /// Scores in R, I, A, S, E, C order.
    pub riasec_vector: Vec<f64>,
}

/// Reads an answer as 0/1. Anything other than 0, 1 or a boolean is invalid.
fn binary_answer(value: &Value) -> Option<u8> {
    match value {
        Value::Bool(b) => Some(u8::from(*b)),
        Value::Number(n) => match n.as_f64() {
            Some(v) if v == 0.0 => Some(0),
            Some(v) if v == 1.0 => Some(1),
            _ => None,
        },
        _ => None,
    }
}

/// Counts answers that are present and binary.
pub fn count_valid_answers(answers: &HashMap<String, Value>) -> usize {
    answers.values().filter_map(binary_answer).count()
}

/// Scores answers keyed by question text against the default question bank.
pub fn calculate_riasec_scores(answers: &HashMap<String, Value>) -> RiasecResult {
    calculate_with_bank(QUESTIONS, answers)
}

/// Per-trait mean of the 0/1 responses, normalized to sum to 1.
/// Missing or invalid answers count as 0.
pub fn calculate_with_bank(bank: &[Question], answers: &HashMap<String, Value>) -> RiasecResult {
    let valid = count_valid_answers(answers);
    if valid != bank.len() {
        warn!("Expected {} answers, got {} valid answers", bank.len(), valid);
    }

    let mut sums: BTreeMap<RiasecTrait, (f64, usize)> =
        RiasecTrait::ALL.iter().map(|t| (*t, (0.0, 0))).collect();
    for question in bank {
        let response = answers
            .get(question.text)
            .and_then(binary_answer)
            .unwrap_or(0);
        let entry = sums.entry(question.trait_code).or_insert((0.0, 0));
        entry.0 += f64::from(response);
        entry.1 += 1;
    }

    let mut scores: BTreeMap<RiasecTrait, f64> = sums
        .into_iter()
        .map(|(t, (sum, n))| (t, if n > 0 { sum / n as f64 } else { 0.0 }))
        .collect();

    let total: f64 = scores.values().sum();
    if total > 0.0 {
        for score in scores.values_mut() {
            *score /= total;
        }
    }

    // Stable sort keeps R-I-A-S-E-C order among ties.
    let mut ranked: Vec<(RiasecTrait, f64)> = scores.iter().map(|(t, s)| (*t, *s)).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let top3 = ranked.into_iter().take(3).map(|(t, _)| t).collect();

    let riasec_vector = RiasecTrait::ALL
        .iter()
        .map(|t| scores.get(t).copied().unwrap_or(0.0))
        .collect();

    RiasecResult {
        scores,
        top3,
        riasec_vector,
    }
}

/// Keeps only binary answers, normalized to 0/1 integers, for persistence.
pub fn sanitize_answers(answers: &HashMap<String, Value>) -> BTreeMap<String, u8> {
    answers
        .iter()
        .filter_map(|(k, v)| binary_answer(v).map(|a| (k.clone(), a)))
        .collect()
}
