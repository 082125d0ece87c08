//! Truncated distributions
//!
//! A distribution conditioned on the `[min, max]` range of a numeric space.
use crate::constants::{MOMENT_STEPS, MOMENT_TAIL_MASS};
use crate::distribution::normal::{NormalDistribution, CANONICAL_NORMAL};
use crate::distribution::ContinuousDistribution;
use crate::errors::PrognosisError;
use crate::space::NumericSpace;
use crate::utils::clamp01;
use log::warn;
use serde::{Deserialize, Serialize};

/// `dist` conditioned on `space`.
///
/// When the underlying distribution puts no mass inside the space, `pdf` and
/// `cdf` return 0 inside the window and `icdf` falls back to the underlying
/// quantile clamped into the space.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncatedDistribution<D> {
    dist: D,
    space: NumericSpace,
    p_in: f64,
    p_lt: f64,
    mean: f64,
    stdev: f64,
}

impl<D: ContinuousDistribution> TruncatedDistribution<D> {
    /// Truncate `dist` to `space`, integrating the moments numerically.
    pub fn new(dist: D, space: NumericSpace) -> Self {
        let mut truncated = Self::with_moments(dist, space, f64::NAN, f64::NAN);
        let (mean, stdev) = truncated.integrate_moments();
        truncated.mean = mean;
        truncated.stdev = stdev;
        truncated
    }

    pub(crate) fn with_moments(dist: D, space: NumericSpace, mean: f64, stdev: f64) -> Self {
        let p_in = dist.probability_between(space.min(), space.max());
        let p_lt = dist.cdf(space.min());
        if p_in.is_nan() || p_in <= 0.0 {
            warn!(
                "Truncation window [{}, {}] has no probability mass, densities collapse to zero.",
                space.min(),
                space.max()
            );
        }
        TruncatedDistribution {
            dist,
            space,
            p_in,
            p_lt,
            mean,
            stdev,
        }
    }

    pub fn underlying(&self) -> &D {
        &self.dist
    }

    /// Mass of the underlying distribution inside the window.
    pub fn p_in(&self) -> f64 {
        self.p_in
    }

    /// Mass of the underlying distribution below the window.
    pub fn p_lt(&self) -> f64 {
        self.p_lt
    }

    fn is_degenerate(&self) -> bool {
        self.p_in.is_nan() || self.p_in <= 0.0
    }

    fn degenerate_moments(&self) -> (f64, f64) {
        (self.dist.mean().clamp(self.space.min(), self.space.max()), 0.0)
    }

    /// Mean and standard deviation over a fine grid of the window. Infinite
    /// bounds are replaced by extreme quantiles of the underlying distribution.
    fn integrate_moments(&self) -> (f64, f64) {
        if self.is_degenerate() {
            return self.degenerate_moments();
        }
        let lo = if self.space.min().is_finite() {
            self.space.min()
        } else {
            self.dist.icdf(MOMENT_TAIL_MASS)
        };
        let hi = if self.space.max().is_finite() {
            self.space.max()
        } else {
            self.dist.icdf(1.0 - MOMENT_TAIL_MASS)
        };
        if lo.is_nan() || hi.is_nan() || lo >= hi {
            return self.degenerate_moments();
        }
        let step = (hi - lo) / MOMENT_STEPS as f64;
        let (mut w_sum, mut m1, mut m2) = (0.0, 0.0, 0.0);
        for i in 0..MOMENT_STEPS {
            let start = lo + step * i as f64;
            let w = self.probability_between(start, start + step).max(0.0);
            let mid = start + step / 2.0;
            w_sum += w;
            m1 += w * mid;
            m2 += w * mid * mid;
        }
        if w_sum <= 0.0 {
            return self.degenerate_moments();
        }
        let mean = m1 / w_sum;
        let var = (m2 / w_sum - mean * mean).max(0.0);
        (mean, var.sqrt())
    }
}

impl<D: ContinuousDistribution> ContinuousDistribution for TruncatedDistribution<D> {
    fn space(&self) -> &NumericSpace {
        &self.space
    }

    fn pdf(&self, x: f64) -> f64 {
        if x < self.space.min() || x > self.space.max() || self.is_degenerate() {
            return 0.0;
        }
        self.dist.pdf(x) / self.p_in
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= self.space.min() {
            return 0.0;
        }
        if x >= self.space.max() {
            return 1.0;
        }
        if self.is_degenerate() {
            return 0.0;
        }
        clamp01(self.dist.probability_between(self.space.min(), x) / self.p_in)
    }

    fn icdf(&self, p: f64) -> f64 {
        let x = if self.is_degenerate() {
            self.dist.icdf(p)
        } else {
            self.dist.icdf(p * self.p_in + self.p_lt)
        };
        if x.is_nan() {
            return x;
        }
        x.clamp(self.space.min(), self.space.max())
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn stdev(&self) -> f64 {
        self.stdev
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTruncatedNormal {
    space: NumericSpace,
    pseudo_mean: f64,
    pseudo_std_dev: f64,
}

impl TryFrom<RawTruncatedNormal> for TruncatedNormalDistribution {
    type Error = PrognosisError;

    fn try_from(raw: RawTruncatedNormal) -> Result<Self, Self::Error> {
        TruncatedNormalDistribution::new(raw.space, raw.pseudo_mean, raw.pseudo_std_dev)
    }
}

impl From<TruncatedNormalDistribution> for RawTruncatedNormal {
    fn from(d: TruncatedNormalDistribution) -> Self {
        RawTruncatedNormal {
            space: d.truncated.space,
            pseudo_mean: d.pseudo_mean,
            pseudo_std_dev: d.pseudo_stdev,
        }
    }
}

/// A normal belief `N(pseudo_mean, pseudo_stdev²)` restricted to a numeric space.
///
/// Confidence intervals are anchored on `pseudo_mean`, the center the forecaster
/// stated, rather than on the shifted mean of the truncated distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTruncatedNormal", into = "RawTruncatedNormal")]
pub struct TruncatedNormalDistribution {
    pseudo_mean: f64,
    pseudo_stdev: f64,
    truncated: TruncatedDistribution<NormalDistribution>,
}

impl TruncatedNormalDistribution {
    pub fn new(space: NumericSpace, pseudo_mean: f64, pseudo_stdev: f64) -> Result<Self, PrognosisError> {
        let normal = NormalDistribution::new(pseudo_mean, pseudo_stdev)?;
        let mut truncated = TruncatedDistribution::with_moments(normal, space, f64::NAN, f64::NAN);
        let (mean, stdev) = truncated_normal_moments(&truncated);
        truncated.mean = mean;
        truncated.stdev = stdev;
        Ok(TruncatedNormalDistribution {
            pseudo_mean,
            pseudo_stdev,
            truncated,
        })
    }

    pub fn pseudo_mean(&self) -> f64 {
        self.pseudo_mean
    }

    pub fn pseudo_stdev(&self) -> f64 {
        self.pseudo_stdev
    }

    pub fn truncated(&self) -> &TruncatedDistribution<NormalDistribution> {
        &self.truncated
    }
}

/// Closed form moments of a truncated normal. Falls back to numeric
/// integration when the window holds too little mass for the formula.
fn truncated_normal_moments(t: &TruncatedDistribution<NormalDistribution>) -> (f64, f64) {
    if t.p_in.is_nan() || t.p_in <= 1e-12 {
        return t.integrate_moments();
    }
    let (mu, sigma) = (t.dist.mean(), t.dist.stdev());
    let a = (t.space.min() - mu) / sigma;
    let b = (t.space.max() - mu) / sigma;
    let phi = |z: f64| if z.is_infinite() { 0.0 } else { CANONICAL_NORMAL.pdf(z) };
    let z_phi = |z: f64| if z.is_infinite() { 0.0 } else { z * CANONICAL_NORMAL.pdf(z) };
    let ratio = (phi(a) - phi(b)) / t.p_in;
    let mean = mu + sigma * ratio;
    let var = sigma * sigma * (1.0 + (z_phi(a) - z_phi(b)) / t.p_in - ratio * ratio);
    (mean.clamp(t.space.min(), t.space.max()), var.max(0.0).sqrt())
}

impl ContinuousDistribution for TruncatedNormalDistribution {
    fn space(&self) -> &NumericSpace {
        self.truncated.space()
    }

    fn pdf(&self, x: f64) -> f64 {
        self.truncated.pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        self.truncated.cdf(x)
    }

    fn icdf(&self, p: f64) -> f64 {
        self.truncated.icdf(p)
    }

    fn mean(&self) -> f64 {
        self.truncated.mean()
    }

    fn stdev(&self) -> f64 {
        self.truncated.stdev()
    }

    fn preferred_ci_center(&self) -> f64 {
        self.pseudo_mean
    }
}
