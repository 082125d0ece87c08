//! Point estimates
//!
//! All probability mass on a single value of a numeric space.
use crate::distribution::ContinuousDistribution;
use crate::errors::PrognosisError;
use crate::space::NumericSpace;
use serde::{Deserialize, Serialize};

const POINT_TOLERANCE: f64 = 1e-10;

#[derive(Deserialize)]
struct RawPointEstimate {
    space: NumericSpace,
    value: f64,
}

impl TryFrom<RawPointEstimate> for PointEstimateDistribution {
    type Error = PrognosisError;

    fn try_from(raw: RawPointEstimate) -> Result<Self, Self::Error> {
        PointEstimateDistribution::new(raw.space, raw.value)
    }
}

/// Degenerate distribution concentrated on `value`.
///
/// The CDF is right-continuous and jumps to 1 at `value`. A point at the
/// space's `min` therefore puts no mass inside any bin when discretized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPointEstimate")]
pub struct PointEstimateDistribution {
    space: NumericSpace,
    value: f64,
}

impl PointEstimateDistribution {
    pub fn new(space: NumericSpace, value: f64) -> Result<Self, PrognosisError> {
        if !space.check_value(value) {
            return Err(PrognosisError::ValueOutOfSpace(value, space.min(), space.max()));
        }
        Ok(PointEstimateDistribution { space, value })
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl ContinuousDistribution for PointEstimateDistribution {
    fn space(&self) -> &NumericSpace {
        &self.space
    }

    fn pdf(&self, x: f64) -> f64 {
        if (x - self.value).abs() < POINT_TOLERANCE {
            f64::INFINITY
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < self.value {
            0.0
        } else {
            1.0
        }
    }

    fn icdf(&self, p: f64) -> f64 {
        if p <= 0.0 {
            self.space.min()
        } else if p >= 1.0 {
            self.space.max()
        } else {
            self.value
        }
    }

    fn mean(&self) -> f64 {
        self.value
    }

    fn stdev(&self) -> f64 {
        0.0
    }
}
