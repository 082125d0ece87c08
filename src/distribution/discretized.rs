//! Discretized distributions
//!
//! Probability mass per equal-width bin. Density is uniform inside a bin, so
//! the CDF is piecewise linear between bin borders.
use crate::binning::Binner;
use crate::constants::MASS_TOLERANCE;
use crate::distribution::ContinuousDistribution;
use crate::errors::PrognosisError;
use crate::space::NumericSpace;
use crate::utils::{clamp01, prefix_sums, validate_float_parameter};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDiscretized {
    space: NumericSpace,
    bin_probs: Vec<f64>,
    #[serde(default)]
    orig_mean: Option<f64>,
    #[serde(default, rename = "origStDev")]
    orig_stdev: Option<f64>,
}

impl TryFrom<RawDiscretized> for DiscretizedContinuousDistribution {
    type Error = PrognosisError;

    fn try_from(raw: RawDiscretized) -> Result<Self, Self::Error> {
        DiscretizedContinuousDistribution::new(raw.space, raw.bin_probs, raw.orig_mean, raw.orig_stdev)
    }
}

/// Per-bin probabilities over a bounded numeric space.
///
/// The original mean and standard deviation of the distribution that was
/// discretized are kept when known, and preferred over the estimates derived
/// from the bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDiscretized", rename_all = "camelCase")]
pub struct DiscretizedContinuousDistribution {
    space: NumericSpace,
    bin_probs: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    orig_mean: Option<f64>,
    #[serde(rename = "origStDev", skip_serializing_if = "Option::is_none")]
    orig_stdev: Option<f64>,
    #[serde(skip)]
    binner: Binner,
    #[serde(skip)]
    prob_before_bin: Vec<f64>,
    #[serde(skip)]
    discretized_mean: f64,
    #[serde(skip)]
    discretized_stdev: f64,
}

impl DiscretizedContinuousDistribution {
    /// Build from per-bin probabilities, one bin per element of `bin_probs`.
    ///
    /// * `space` - Bounded space the bins partition.
    /// * `bin_probs` - Non-negative mass of every bin, adding up to at most 1.
    /// * `orig_mean` - Mean of the distribution before discretization, if known.
    /// * `orig_stdev` - Standard deviation before discretization, if known.
    ///
    /// A total mass below 1 is kept as is: the missing mass sits at `max`,
    /// where the CDF jumps to 1.
    pub fn new(
        space: NumericSpace,
        bin_probs: Vec<f64>,
        orig_mean: Option<f64>,
        orig_stdev: Option<f64>,
    ) -> Result<Self, PrognosisError> {
        let binner = Binner::new(&space, bin_probs.len())?;
        for p in &bin_probs {
            validate_float_parameter(*p, 0.0, f64::MAX, "bin_probs")?;
        }
        let total: f64 = bin_probs.iter().sum();
        if total > 1.0 + MASS_TOLERANCE {
            return Err(PrognosisError::InvalidParameter(
                String::from("bin_probs"),
                String::from("total probability of at most 1"),
                total.to_string(),
            ));
        }
        let space = space.rebinned(&binner);
        Self::from_parts(space, binner, bin_probs, orig_mean, orig_stdev)
    }

    /// Assemble from already checked probabilities. Fails on zero-width bins.
    pub(crate) fn from_parts(
        space: NumericSpace,
        binner: Binner,
        bin_probs: Vec<f64>,
        orig_mean: Option<f64>,
        orig_stdev: Option<f64>,
    ) -> Result<Self, PrognosisError> {
        if binner.bin_size() <= 0.0 {
            return Err(PrognosisError::EmptyRange(binner.min(), binner.max()));
        }
        let prob_before_bin = prefix_sums(&bin_probs);
        let (discretized_mean, discretized_stdev) = bin_moments(&binner, &bin_probs);
        Ok(DiscretizedContinuousDistribution {
            space,
            bin_probs,
            orig_mean,
            orig_stdev,
            binner,
            prob_before_bin,
            discretized_mean,
            discretized_stdev,
        })
    }

    pub fn into_bin_probs(self) -> Vec<f64> {
        self.bin_probs
    }

    pub fn bin_probs(&self) -> &[f64] {
        &self.bin_probs
    }

    /// Mass strictly before every bin, `bins + 1` values starting at 0.
    pub fn prob_before_bin(&self) -> &[f64] {
        &self.prob_before_bin
    }

    pub fn binner(&self) -> &Binner {
        &self.binner
    }

    pub fn discretized_mean(&self) -> f64 {
        self.discretized_mean
    }

    pub fn discretized_stdev(&self) -> f64 {
        self.discretized_stdev
    }

    /// The reported mean is estimated from the bins.
    pub fn mean_is_discretized(&self) -> bool {
        self.orig_mean.is_none()
    }

    /// The reported standard deviation is estimated from the bins.
    pub fn stdev_is_discretized(&self) -> bool {
        self.orig_stdev.is_none()
    }

    /// Largest density of any bin.
    pub fn max_density(&self) -> f64 {
        self.bin_probs.iter().fold(0.0_f64, |acc, p| acc.max(*p)) / self.binner.bin_size()
    }
}

/// Probability weighted mean and standard deviation of the bin midpoints.
fn bin_moments(binner: &Binner, bin_probs: &[f64]) -> (f64, f64) {
    let total: f64 = bin_probs.iter().sum();
    if total <= 0.0 {
        return ((binner.min() + binner.max()) / 2.0, 0.0);
    }
    let mean = binner.bin_midpoints().zip(bin_probs).map(|(m, p)| m * p).sum::<f64>() / total;
    let var = binner
        .bin_midpoints()
        .zip(bin_probs)
        .map(|(m, p)| p * (m - mean) * (m - mean))
        .sum::<f64>()
        / total;
    (mean, var.sqrt())
}

impl ContinuousDistribution for DiscretizedContinuousDistribution {
    fn space(&self) -> &NumericSpace {
        &self.space
    }

    fn pdf(&self, x: f64) -> f64 {
        match self.binner.value2bin(x) {
            Some(bin) => self.bin_probs[bin] / self.binner.bin_size(),
            None => 0.0,
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        if x >= self.space.max() {
            return 1.0;
        }
        match self.binner.value2bin(x) {
            Some(bin) => {
                let start = self.binner.bin_range(bin).start;
                clamp01(self.prob_before_bin[bin] + self.bin_probs[bin] * (x - start) / self.binner.bin_size())
            }
            None => 0.0,
        }
    }

    /// Generalized inverse of the piecewise linear CDF.
    ///
    /// `p` is clamped to `[0, 1]`. A target bin without mass yields its left
    /// edge, a quantile past the accumulated mass yields the space maximum.
    fn icdf(&self, p: f64) -> f64 {
        if p.is_nan() {
            return f64::NAN;
        }
        let p = clamp01(p);
        let bins = self.bin_probs.len();
        let idx = self.prob_before_bin.partition_point(|v| *v < p);
        if idx < self.prob_before_bin.len() && self.prob_before_bin[idx] == p {
            return if idx >= bins {
                self.space.max()
            } else {
                self.binner.bin_range(idx).start
            };
        }
        if idx == 0 {
            return self.space.min();
        }
        let bin = idx - 1;
        if bin >= bins {
            return self.space.max();
        }
        let range = self.binner.bin_range(bin);
        let mass = self.bin_probs[bin];
        if mass <= 0.0 {
            return range.start;
        }
        let remaining_prob = p - self.prob_before_bin[bin];
        (range.start + self.binner.bin_size() / mass * remaining_prob).min(range.end)
    }

    fn mean(&self) -> f64 {
        self.orig_mean.unwrap_or(self.discretized_mean)
    }

    fn stdev(&self) -> f64 {
        self.orig_stdev.unwrap_or(self.discretized_stdev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::{NormalDistribution, TruncatedNormalDistribution};

    fn uniform(bins: usize) -> DiscretizedContinuousDistribution {
        let space = NumericSpace::new(0.0, bins as f64, bins).unwrap();
        DiscretizedContinuousDistribution::new(space, vec![1.0 / bins as f64; bins], None, None).unwrap()
    }

    #[test]
    fn test_prob_before_bin() {
        let space = NumericSpace::new(0.0, 4.0, 4).unwrap();
        let d = DiscretizedContinuousDistribution::new(space, vec![0.1, 0.2, 0.3, 0.4], None, None).unwrap();
        assert_eq!(d.prob_before_bin().len(), 5);
        assert_eq!(d.prob_before_bin()[0], 0.0);
        assert!((d.prob_before_bin()[4] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cdf_interpolates_inside_bin() {
        let d = uniform(4);
        assert_eq!(d.cdf(-1.0), 0.0);
        assert_eq!(d.cdf(0.0), 0.0);
        assert!((d.cdf(0.5) - 0.125).abs() < 1e-12);
        assert!((d.cdf(2.0) - 0.5).abs() < 1e-12);
        assert_eq!(d.cdf(4.0), 1.0);
        assert_eq!(d.cdf(5.0), 1.0);
        assert!((d.pdf(1.5) - 0.25).abs() < 1e-12);
        assert_eq!(d.pdf(4.5), 0.0);
    }

    #[test]
    fn test_icdf_exact_hits() {
        let d = uniform(4);
        assert_eq!(d.icdf(0.0), 0.0);
        assert_eq!(d.icdf(0.25), 1.0);
        assert_eq!(d.icdf(0.5), 2.0);
        assert_eq!(d.icdf(1.0), 4.0);
    }

    #[test]
    fn test_icdf_interpolates() {
        let d = uniform(4);
        assert!((d.icdf(0.125) - 0.5).abs() < 1e-12);
        assert!((d.icdf(0.9) - 3.6).abs() < 1e-12);
        assert_eq!(d.icdf(-0.5), 0.0);
        assert_eq!(d.icdf(1.5), 4.0);
        assert!(d.icdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_icdf_round_trip_at_borders() {
        let space = NumericSpace::new(0.0, 20.0, 4).unwrap();
        let d = TruncatedNormalDistribution::new(space, 10.0, 2.0)
            .unwrap()
            .discretize(4)
            .unwrap();
        for border in d.binner().bin_borders() {
            let p = d.cdf(border);
            assert!((d.icdf(p) - border).abs() < 1e-9, "border {}", border);
        }
        for i in 1..100 {
            let p = i as f64 / 100.0;
            assert!((d.cdf(d.icdf(p)) - p).abs() < 1e-9);
        }
    }

    #[test]
    fn test_discretize_normal_over_bounded_binner() {
        let space = NumericSpace::new(0.0, 20.0, 4).unwrap();
        let binner = Binner::new(&space, 4).unwrap();
        let d = NormalDistribution::new(10.0, 2.0).unwrap().discretize_with(&binner).unwrap();
        let probs = d.bin_probs();
        assert_eq!(probs.len(), 4);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-5);
        assert!(probs[1] > probs[0] && probs[1] > probs[3]);
        assert!(probs[2] > probs[0] && probs[2] > probs[3]);
        assert_eq!(d.mean(), 10.0);
        assert_eq!(d.stdev(), 2.0);
        assert_eq!(d.space().min(), 0.0);
        assert_eq!(d.space().max(), 20.0);
    }

    #[test]
    fn test_discretization_conserves_mass() {
        let space = NumericSpace::new(-3.0, 7.0, 50).unwrap();
        for (mean, stdev) in [(0.0, 1.0), (6.5, 0.2), (-10.0, 3.0), (2.0, 50.0)] {
            let d = TruncatedNormalDistribution::new(space.clone(), mean, stdev).unwrap();
            for bins in [1, 7, 50, 1000] {
                let sum: f64 = d.discretize(bins).unwrap().bin_probs().iter().sum();
                assert!((sum - 1.0).abs() < 1e-9, "mean {} stdev {} bins {}", mean, stdev, bins);
            }
        }
    }

    #[test]
    fn test_zero_mass_bins() {
        let space = NumericSpace::new(0.0, 3.0, 3).unwrap();
        let d = DiscretizedContinuousDistribution::new(space, vec![0.5, 0.0, 0.5], None, None).unwrap();
        // Quantile 0.5 is reached at the end of the first bin.
        assert_eq!(d.icdf(0.5), 1.0);
        assert!((d.icdf(0.75) - 2.5).abs() < 1e-12);
        assert_eq!(d.pdf(1.5), 0.0);
        assert!((d.cdf(1.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mass_short_of_one() {
        let space = NumericSpace::new(0.0, 2.0, 2).unwrap();
        let d = DiscretizedContinuousDistribution::new(space, vec![0.4, 0.4], None, None).unwrap();
        assert_eq!(d.icdf(0.9), 2.0);
    }

    #[test]
    fn test_moments() {
        let d = uniform(4);
        assert!((d.mean() - 2.0).abs() < 1e-12);
        assert!(d.mean_is_discretized());
        // Midpoints 0.5, 1.5, 2.5, 3.5 around 2.0
        assert!((d.stdev() - 1.25_f64.sqrt()).abs() < 1e-12);

        let space = NumericSpace::new(0.0, 4.0, 4).unwrap();
        let d = DiscretizedContinuousDistribution::new(space, vec![0.25; 4], Some(1.9), Some(1.1)).unwrap();
        assert_eq!(d.mean(), 1.9);
        assert_eq!(d.stdev(), 1.1);
        assert!(!d.stdev_is_discretized());
        assert!((d.discretized_mean() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_construction() {
        let space = NumericSpace::new(0.0, 1.0, 2).unwrap();
        assert!(DiscretizedContinuousDistribution::new(space.clone(), vec![], None, None).is_err());
        assert!(DiscretizedContinuousDistribution::new(space.clone(), vec![0.5, -0.1], None, None).is_err());
        assert!(DiscretizedContinuousDistribution::new(space, vec![0.5, f64::NAN], None, None).is_err());
        let unbounded = NumericSpace::new(0.0, f64::INFINITY, 2).unwrap();
        assert!(DiscretizedContinuousDistribution::new(unbounded, vec![0.5, 0.5], None, None).is_err());
        let point = NumericSpace::new(1.0, 1.0, 2).unwrap();
        assert!(matches!(
            DiscretizedContinuousDistribution::new(point, vec![0.5, 0.5], None, None),
            Err(PrognosisError::EmptyRange(_, _))
        ));
    }

    #[test]
    fn test_total_mass_at_most_one() {
        let space = NumericSpace::new(0.0, 2.0, 2).unwrap();
        assert!(matches!(
            DiscretizedContinuousDistribution::new(space.clone(), vec![0.6, 0.6], None, None),
            Err(PrognosisError::InvalidParameter(..))
        ));
        let bad = r#"{"space": {"min": 0.0, "max": 2.0}, "binProbs": [3.0, 4.0]}"#;
        assert!(serde_json::from_str::<DiscretizedContinuousDistribution>(bad).is_err());

        // Rounding noise above 1 is accepted and the CDF stays in [0, 1].
        let d = DiscretizedContinuousDistribution::new(space.clone(), vec![0.5, 0.5 + 1e-9], None, None).unwrap();
        for x in [0.0, 0.5, 1.0, 1.5, 1.999999, 2.0] {
            assert!((0.0..=1.0).contains(&d.cdf(x)));
        }

        let d = DiscretizedContinuousDistribution::new(space, vec![0.3, 0.3], None, None).unwrap();
        assert!((d.cdf(1.9) - 0.57).abs() < 1e-12);
        assert_eq!(d.cdf(2.0), 1.0);
    }

    #[test]
    fn test_discretize_empty_range() {
        let point = NumericSpace::new(3.0, 3.0, 100).unwrap();
        let d = TruncatedNormalDistribution::new(point, 3.0, 1.0).unwrap();
        let err = d.discretize(4).unwrap_err();
        assert!(matches!(err, PrognosisError::EmptyRange(min, max) if min == 3.0 && max == 3.0));
        assert_eq!(err.to_string(), "Unable to bin the empty range [3, 3].");

        let space = NumericSpace::new(0.0, 6.0, 100).unwrap();
        let d = TruncatedNormalDistribution::new(space, 3.0, 1.0).unwrap().discretize(4).unwrap();
        assert!(d.bin_probs().iter().all(|p| p.is_finite()));
        assert!(d.pdf(2.0).is_finite());
        let json = serde_json::to_string(&d).unwrap();
        let back: DiscretizedContinuousDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_serde_rebuilds_caches() {
        let space = NumericSpace::new(0.0, 4.0, 4).unwrap();
        let d = DiscretizedContinuousDistribution::new(space, vec![0.1, 0.2, 0.3, 0.4], Some(2.5), None).unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"binProbs\":[0.1,0.2,0.3,0.4]"));
        assert!(json.contains("\"origMean\":2.5"));
        assert!(!json.contains("origStDev"));
        assert!(!json.contains("probBeforeBin"));
        let back: DiscretizedContinuousDistribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
        assert_eq!(back.prob_before_bin().len(), 5);
    }
}
