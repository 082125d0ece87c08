//! Normal distributions
//!
//! `CanonicalNormalDistribution` is the standard normal N(0, 1), computed with
//! fixed rational approximations. `NormalDistribution` is its affine transform.
use crate::constants::{ICDF_LOWER_TAIL, NORMAL_CDF_SATURATION};
use crate::distribution::ContinuousDistribution;
use crate::errors::PrognosisError;
use crate::space::{NumericSpace, UNBOUNDED};
use crate::utils::{validate_float_parameter, validate_positive_float_parameter};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

// Zelen & Severo (1964), Handbook of Mathematical Functions 26.2.17.
const CDF_B0: f64 = 0.2316419;
const CDF_B1: f64 = 0.319381530;
const CDF_B2: f64 = -0.356563782;
const CDF_B3: f64 = 1.781477937;
const CDF_B4: f64 = -1.821255978;
const CDF_B5: f64 = 1.330274429;

// Acklam (2000), inverse normal CDF.
const ICDF_A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];
const ICDF_B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];
const ICDF_C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];
const ICDF_D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Rational tail approximation, `q = sqrt(-2 ln p)`.
#[inline]
fn icdf_tail(q: f64) -> f64 {
    let [c0, c1, c2, c3, c4, c5] = ICDF_C;
    let [d0, d1, d2, d3] = ICDF_D;
    (((((c0 * q + c1) * q + c2) * q + c3) * q + c4) * q + c5) / ((((d0 * q + d1) * q + d2) * q + d3) * q + 1.0)
}

/// The standard normal distribution N(0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanonicalNormalDistribution;

pub const CANONICAL_NORMAL: CanonicalNormalDistribution = CanonicalNormalDistribution;

impl ContinuousDistribution for CanonicalNormalDistribution {
    fn space(&self) -> &NumericSpace {
        &UNBOUNDED
    }

    fn pdf(&self, x: f64) -> f64 {
        (-((2.0 * PI).ln() + x * x) * 0.5).exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        if x > NORMAL_CDF_SATURATION {
            return 1.0;
        }
        if x < -NORMAL_CDF_SATURATION {
            return 0.0;
        }
        let t = 1.0 / (1.0 + CDF_B0 * x.abs());
        let y = t * (CDF_B1 + CDF_B2 * t + (CDF_B3 + CDF_B4 * t + CDF_B5 * t * t) * t * t);
        if x < 0.0 {
            self.pdf(-x) * y
        } else {
            1.0 - self.pdf(x) * y
        }
    }

    fn icdf(&self, p: f64) -> f64 {
        if p.is_nan() {
            return f64::NAN;
        }
        if p <= 0.0 {
            return f64::NEG_INFINITY;
        }
        if p >= 1.0 {
            return f64::INFINITY;
        }
        let p_high = 1.0 - ICDF_LOWER_TAIL;
        if p < ICDF_LOWER_TAIL {
            return icdf_tail((-p.ln() * 2.0).sqrt());
        }
        if p > p_high {
            return -icdf_tail((-(1.0 - p).ln() * 2.0).sqrt());
        }
        let [a0, a1, a2, a3, a4, a5] = ICDF_A;
        let [b0, b1, b2, b3, b4] = ICDF_B;
        let q = p - 0.5;
        let r = q * q;
        (((((a0 * r + a1) * r + a2) * r + a3) * r + a4) * r + a5) * q
            / (((((b0 * r + b1) * r + b2) * r + b3) * r + b4) * r + 1.0)
    }

    fn mean(&self) -> f64 {
        0.0
    }

    fn stdev(&self) -> f64 {
        1.0
    }
}

#[derive(Deserialize)]
struct RawNormal {
    mean: f64,
    #[serde(rename = "stDev")]
    stdev: f64,
}

impl TryFrom<RawNormal> for NormalDistribution {
    type Error = PrognosisError;

    fn try_from(raw: RawNormal) -> Result<Self, Self::Error> {
        NormalDistribution::new(raw.mean, raw.stdev)
    }
}

/// Normal distribution N(mean, stdev²) over the whole real line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNormal")]
pub struct NormalDistribution {
    mean: f64,
    #[serde(rename = "stDev")]
    stdev: f64,
}

impl NormalDistribution {
    /// * `mean` - Location, must be finite.
    /// * `stdev` - Scale, must be finite and positive.
    pub fn new(mean: f64, stdev: f64) -> Result<Self, PrognosisError> {
        validate_float_parameter(mean, f64::MIN, f64::MAX, "mean")?;
        validate_positive_float_parameter(stdev, "stdev")?;
        Ok(NormalDistribution { mean, stdev })
    }

    #[inline]
    fn xform(&self, x: f64) -> f64 {
        (x - self.mean) / self.stdev
    }
}

impl ContinuousDistribution for NormalDistribution {
    fn space(&self) -> &NumericSpace {
        &UNBOUNDED
    }

    fn pdf(&self, x: f64) -> f64 {
        CANONICAL_NORMAL.pdf(self.xform(x))
    }

    fn cdf(&self, x: f64) -> f64 {
        CANONICAL_NORMAL.cdf(self.xform(x))
    }

    fn icdf(&self, p: f64) -> f64 {
        self.mean + self.stdev * CANONICAL_NORMAL.icdf(p)
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn stdev(&self) -> f64 {
        self.stdev
    }
}
