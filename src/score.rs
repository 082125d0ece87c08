//! Scoring
//!
//! Normalized Brier scores of binary predictions.
use crate::distribution::ProbabilityDistribution;
use crate::question::Question;
use crate::space::Space;
use crate::value::Value;

/// Brier score rescaled so an uninformed 50% prediction scores 0, a certain
/// correct prediction scores 1 and a certain wrong one scores -3.
pub fn normalized_brier(prediction: f64, resolution: bool) -> f64 {
    let outcome = if resolution { 1.0 } else { 0.0 };
    let squared_error = (outcome - prediction).powi(2);
    (0.25 - squared_error) * 4.0
}

/// Score of a prediction on a resolved binary question.
///
/// `None` when the question is unresolved, not binary, or the prediction is
/// missing or not binary.
pub fn get_score(question: &Question, dist: Option<&ProbabilityDistribution>) -> Option<f64> {
    match (question.answer_space(), question.resolution()?, dist?) {
        (Space::Binary, Value::Binary(v), ProbabilityDistribution::Binary(d)) => {
            Some(normalized_brier(d.yes_prob(), v.value))
        }
        _ => None,
    }
}
