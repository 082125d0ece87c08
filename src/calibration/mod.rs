//! Calibration Module
//!
//! Tracks how often predictions made with a given confidence come true.
//!
//! # Submodules
//!
//! * `bin`: The six confidence brackets and bin lookup.
//! * `vector`: Per-bin tallies and the reduction of numeric predictions to binary ones.
//! * `detail`: Per-question records behind a calibration vector.

pub mod bin;
pub mod detail;
pub mod vector;

pub use bin::CalibrationBin;
pub use detail::CalibrationDetail;
pub use vector::{numeric2binary, CalibrationEntry, CalibrationVector};

use crate::config::EngineConfig;
use crate::distribution::ProbabilityDistribution;
use crate::errors::PrognosisError;
use crate::question::Question;
use crate::space::Space;
use crate::value::Value;
use log::{debug, info};
use rayon::prelude::*;

/// Calibration contribution of one prediction on a question.
///
/// Unresolved questions, and predictions whose kind does not match the
/// question, contribute nothing.
pub fn get_calibration(question: &Question, dist: &ProbabilityDistribution) -> CalibrationVector {
    let Some(resolution) = question.resolution() else {
        debug!("Skipping prediction on an unresolved question.");
        return CalibrationVector::new();
    };
    match (question.answer_space(), resolution, dist) {
        (Space::Binary, Value::Binary(v), ProbabilityDistribution::Binary(d)) => {
            CalibrationVector::from_observation(d.yes_prob(), v.value)
        }
        (Space::Numeric(_), Value::Numeric(v), d) => match d.as_continuous() {
            Some(c) => CalibrationVector::from_numeric(c, v.value()),
            None => {
                debug!("Skipping binary prediction on a numeric question.");
                CalibrationVector::new()
            }
        },
        (space, _, d) => {
            debug!(
                "Skipping {} prediction on a {} question.",
                d.kind(),
                space.kind()
            );
            CalibrationVector::new()
        }
    }
}

/// Records behind [`get_calibration`], one per bin the prediction counts towards.
pub fn calibration_details(question: &Question, dist: &ProbabilityDistribution) -> Vec<CalibrationDetail> {
    let Some(resolution) = question.resolution() else {
        return Vec::new();
    };
    match (question.answer_space(), resolution, dist) {
        (Space::Binary, Value::Binary(v), ProbabilityDistribution::Binary(d)) => {
            let p = d.yes_prob();
            CalibrationBin::find(p)
                .map(|(bin, expected_outcome)| CalibrationDetail::Binary {
                    confidence: p.max(1.0 - p),
                    bin,
                    expected_outcome,
                    actual_outcome: v.value,
                })
                .into_iter()
                .collect()
        }
        (Space::Numeric(_), Value::Numeric(v), d) => match d.as_continuous() {
            Some(c) => CalibrationBin::ALL
                .iter()
                .map(|bin| {
                    let confidence = bin.mid();
                    let ci = c.confidence_interval(confidence);
                    CalibrationDetail::Numeric {
                        confidence,
                        bin: *bin,
                        confidence_interval: (*ci.start(), *ci.end()),
                        resolution: v.value(),
                    }
                })
                .collect(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Sum the calibration of many predictions.
///
/// * `items` - Questions paired with the prediction made on them.
/// * `cfg` - Whether to run in parallel, on how many threads, and whether numeric questions count.
pub fn aggregate_calibration(
    items: &[(Question, ProbabilityDistribution)],
    cfg: &EngineConfig,
) -> Result<CalibrationVector, PrognosisError> {
    let calibrate = |(question, dist): &(Question, ProbabilityDistribution)| {
        if !cfg.include_numeric && matches!(question.answer_space(), Space::Numeric(_)) {
            CalibrationVector::new()
        } else {
            get_calibration(question, dist)
        }
    };
    let calibration = if cfg.parallel {
        cfg.install(|| {
            items
                .par_iter()
                .map(calibrate)
                .reduce(CalibrationVector::new, |a, b| a + b)
        })?
    } else {
        items.iter().map(calibrate).sum()
    };
    info!(
        "Aggregated calibration of {} predictions into {} observations.",
        items.len(),
        calibration.total().count()
    );
    Ok(calibration)
}
