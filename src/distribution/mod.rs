//! Probability distributions
//!
//! A forecaster's belief about an outcome. Binary questions carry a single
//! probability of "yes", numeric questions carry a continuous distribution
//! over the answer space.
//!
//! # Submodules
//!
//! * `normal`: canonical and general normal distributions.
//! * `truncated`: distributions conditioned on a numeric range.
//! * `discretized`: per-bin probability mass with linear interpolation inside bins.
//! * `point`: a degenerate distribution concentrated on a single value.

pub mod discretized;
pub mod normal;
pub mod point;
pub mod truncated;

use crate::binning::Binner;
use crate::errors::PrognosisError;
use crate::space::NumericSpace;
use crate::utils::validate_float_parameter;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub use discretized::DiscretizedContinuousDistribution;
pub use normal::{CanonicalNormalDistribution, NormalDistribution, CANONICAL_NORMAL};
pub use point::PointEstimateDistribution;
pub use truncated::{TruncatedDistribution, TruncatedNormalDistribution};

/// Contract shared by every continuous distribution.
///
/// `cdf` must be non-decreasing with `cdf(min) = 0` and `cdf(max) = 1` over
/// the distribution's space, and `icdf` must be its generalized inverse.
/// `pdf`, `cdf` and `icdf` are total functions.
pub trait ContinuousDistribution {
    /// Space the distribution is defined over.
    fn space(&self) -> &NumericSpace;
    fn pdf(&self, x: f64) -> f64;
    fn cdf(&self, x: f64) -> f64;
    fn icdf(&self, p: f64) -> f64;
    fn mean(&self) -> f64;
    fn stdev(&self) -> f64;

    /// Value confidence intervals are anchored on.
    fn preferred_ci_center(&self) -> f64 {
        self.mean()
    }

    fn probability_between(&self, start: f64, end: f64) -> f64 {
        self.cdf(end) - self.cdf(start)
    }

    fn density_between(&self, start: f64, end: f64) -> f64 {
        self.probability_between(start, end) / (end - start)
    }

    /// Interval holding probability mass `p`, centered on the preferred center.
    fn confidence_interval(&self, p: f64) -> RangeInclusive<f64> {
        self.confidence_interval_around(p, self.preferred_ci_center())
    }

    /// Interval holding probability mass `p`, centered in CDF space on `center`.
    ///
    /// When the interval would leave `[0, 1]` in CDF space it is clamped to the
    /// corresponding edge of the space and takes all its mass from that edge.
    fn confidence_interval_around(&self, p: f64, center: f64) -> RangeInclusive<f64> {
        let prob_radius = p / 2.0;
        let center_cdf = self.cdf(center);
        let left_cdf = center_cdf - prob_radius;
        let right_cdf = center_cdf + prob_radius;
        if left_cdf <= 0.0 {
            self.space().min()..=self.icdf(p)
        } else if right_cdf >= 1.0 {
            self.icdf(1.0 - p)..=self.space().max()
        } else {
            self.icdf(left_cdf)..=self.icdf(right_cdf)
        }
    }

    /// Probability mass of every bin of `binner`. Fails when the bins have zero width.
    fn discretize_with(&self, binner: &Binner) -> Result<DiscretizedContinuousDistribution, PrognosisError> {
        let bin_probs = binner
            .bin_ranges()
            .map(|r| self.probability_between(r.start, r.end).max(0.0))
            .collect();
        DiscretizedContinuousDistribution::from_parts(
            self.space().rebinned(binner),
            *binner,
            bin_probs,
            Some(self.mean()),
            Some(self.stdev()),
        )
    }

    /// Discretize into `bins` equal-width bins over the distribution's space.
    fn discretize(&self, bins: usize) -> Result<DiscretizedContinuousDistribution, PrognosisError> {
        let binner = Binner::new(self.space(), bins)?;
        self.discretize_with(&binner)
    }

    /// Discretize with the default bin count of the distribution's space.
    fn discretize_default(&self) -> Result<DiscretizedContinuousDistribution, PrognosisError> {
        self.discretize(self.space().bins())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBinaryDistribution {
    yes_prob: f64,
}

impl TryFrom<RawBinaryDistribution> for BinaryDistribution {
    type Error = PrognosisError;

    fn try_from(raw: RawBinaryDistribution) -> Result<Self, Self::Error> {
        BinaryDistribution::new(raw.yes_prob)
    }
}

/// Belief about a yes/no outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBinaryDistribution", rename_all = "camelCase")]
pub struct BinaryDistribution {
    yes_prob: f64,
}

impl BinaryDistribution {
    pub fn new(yes_prob: f64) -> Result<Self, PrognosisError> {
        validate_float_parameter(yes_prob, 0.0, 1.0, "yes_prob")?;
        Ok(BinaryDistribution { yes_prob })
    }

    pub fn yes_prob(&self) -> f64 {
        self.yes_prob
    }

    pub fn no_prob(&self) -> f64 {
        1.0 - self.yes_prob
    }

    /// Probability assigned to `outcome`.
    pub fn prob_of(&self, outcome: bool) -> f64 {
        if outcome {
            self.yes_prob
        } else {
            self.no_prob()
        }
    }
}

/// Any distribution a prediction can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProbabilityDistribution {
    Binary(BinaryDistribution),
    Normal(NormalDistribution),
    TruncatedNormal(TruncatedNormalDistribution),
    Discretized(DiscretizedContinuousDistribution),
    PointEstimate(PointEstimateDistribution),
}

impl ProbabilityDistribution {
    /// The continuous view of the distribution, `None` for binary ones.
    pub fn as_continuous(&self) -> Option<&dyn ContinuousDistribution> {
        match self {
            ProbabilityDistribution::Binary(_) => None,
            ProbabilityDistribution::Normal(d) => Some(d),
            ProbabilityDistribution::TruncatedNormal(d) => Some(d),
            ProbabilityDistribution::Discretized(d) => Some(d),
            ProbabilityDistribution::PointEstimate(d) => Some(d),
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryDistribution> {
        match self {
            ProbabilityDistribution::Binary(d) => Some(d),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProbabilityDistribution::Binary(_) => "binary",
            ProbabilityDistribution::Normal(_) => "normal",
            ProbabilityDistribution::TruncatedNormal(_) => "truncatedNormal",
            ProbabilityDistribution::Discretized(_) => "discretized",
            ProbabilityDistribution::PointEstimate(_) => "pointEstimate",
        }
    }
}

impl From<BinaryDistribution> for ProbabilityDistribution {
    fn from(d: BinaryDistribution) -> Self {
        ProbabilityDistribution::Binary(d)
    }
}

impl From<NormalDistribution> for ProbabilityDistribution {
    fn from(d: NormalDistribution) -> Self {
        ProbabilityDistribution::Normal(d)
    }
}

impl From<TruncatedNormalDistribution> for ProbabilityDistribution {
    fn from(d: TruncatedNormalDistribution) -> Self {
        ProbabilityDistribution::TruncatedNormal(d)
    }
}

impl From<DiscretizedContinuousDistribution> for ProbabilityDistribution {
    fn from(d: DiscretizedContinuousDistribution) -> Self {
        ProbabilityDistribution::Discretized(d)
    }
}

impl From<PointEstimateDistribution> for ProbabilityDistribution {
    fn from(d: PointEstimateDistribution) -> Self {
        ProbabilityDistribution::PointEstimate(d)
    }
}
