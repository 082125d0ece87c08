//! Per-question calibration records, one per prediction and bin it falls into.
use crate::calibration::bin::CalibrationBin;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CalibrationDetail {
    /// A binary prediction and how it resolved.
    #[serde(rename_all = "camelCase")]
    Binary {
        confidence: f64,
        bin: CalibrationBin,
        expected_outcome: bool,
        actual_outcome: bool,
    },
    /// A numeric prediction's confidence interval for one bin and the resolved value.
    #[serde(rename_all = "camelCase")]
    Numeric {
        confidence: f64,
        bin: CalibrationBin,
        confidence_interval: (f64, f64),
        resolution: f64,
    },
}

impl CalibrationDetail {
    pub fn bin(&self) -> CalibrationBin {
        match self {
            CalibrationDetail::Binary { bin, .. } | CalibrationDetail::Numeric { bin, .. } => *bin,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            CalibrationDetail::Binary { confidence, .. } | CalibrationDetail::Numeric { confidence, .. } => {
                *confidence
            }
        }
    }

    /// Whether the prediction turned out right.
    pub fn is_correct(&self) -> bool {
        match self {
            CalibrationDetail::Binary {
                expected_outcome,
                actual_outcome,
                ..
            } => expected_outcome == actual_outcome,
            CalibrationDetail::Numeric {
                confidence_interval: (lo, hi),
                resolution,
                ..
            } => lo <= resolution && resolution <= hi,
        }
    }
}
