//! Histogram
//!
//! Distribution of binary predictions over equal-width probability buckets.
use crate::config::EngineConfig;
use crate::distribution::BinaryDistribution;
use crate::errors::PrognosisError;
use crate::utils::{mean, median};
use serde::{Deserialize, Serialize};

/// A bucket `[min, max)` and the number of predictions in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Histogram of yes-probabilities with summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryHistogram {
    pub bins: Vec<HistogramBin>,
    pub median: Option<f64>,
    pub mean: Option<f64>,
}

impl BinaryHistogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Buckets probabilities into `bins + 1` buckets of width `1 / bins`, the last
/// one holding predictions of exactly 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryHistogramBinner {
    bins: usize,
}

impl BinaryHistogramBinner {
    pub fn new(bins: usize) -> Result<Self, PrognosisError> {
        if bins == 0 {
            return Err(PrognosisError::InvalidBins(bins));
        }
        Ok(BinaryHistogramBinner { bins })
    }

    pub fn from_config(cfg: &EngineConfig) -> Result<Self, PrognosisError> {
        BinaryHistogramBinner::new(cfg.histogram_bins)
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Bucket of a probability. Negative or NaN probabilities have none.
    pub fn value2bin(&self, p: f64) -> Option<usize> {
        if p.is_nan() || p < 0.0 {
            return None;
        }
        let index = (p * self.bins as f64).floor() as usize;
        Some(index.min(self.bins))
    }

    pub fn create_histogram<'a, I>(&self, predictions: I) -> BinaryHistogram
    where
        I: IntoIterator<Item = &'a BinaryDistribution>,
    {
        let width = 1.0 / self.bins as f64;
        let mut bins: Vec<HistogramBin> = (0..=self.bins)
            .map(|i| HistogramBin {
                min: i as f64 * width,
                max: (i + 1) as f64 * width,
                count: 0,
            })
            .collect();
        let probs: Vec<f64> = predictions.into_iter().map(|d| d.yes_prob()).collect();
        for p in &probs {
            if let Some(i) = self.value2bin(*p) {
                bins[i].count += 1;
            }
        }
        BinaryHistogram {
            bins,
            median: median(&probs),
            mean: mean(&probs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dists(ps: &[f64]) -> Vec<BinaryDistribution> {
        ps.iter().map(|p| BinaryDistribution::new(*p).unwrap()).collect()
    }

    #[test]
    fn test_histogram_counts() {
        let binner = BinaryHistogramBinner::new(10).unwrap();
        let preds = dists(&[0.05, 0.15, 0.16, 0.5, 1.0]);
        let hist = binner.create_histogram(&preds);
        assert_eq!(hist.bins.len(), 11);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[1].count, 2);
        assert_eq!(hist.bins[5].count, 1);
        assert_eq!(hist.bins[10].count, 1);
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.median, Some(0.16));
        assert!((hist.mean.unwrap() - 0.372).abs() < 1e-12);
    }

    #[test]
    fn test_empty_histogram() {
        let binner = BinaryHistogramBinner::from_config(&EngineConfig::default()).unwrap();
        let hist = binner.create_histogram(&Vec::<BinaryDistribution>::new());
        assert_eq!(hist.bins.len(), 21);
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.median, None);
        assert_eq!(hist.mean, None);
    }

    #[test]
    fn test_value2bin() {
        let binner = BinaryHistogramBinner::new(20).unwrap();
        assert_eq!(binner.value2bin(0.0), Some(0));
        assert_eq!(binner.value2bin(1.0), Some(20));
        assert_eq!(binner.value2bin(-0.1), None);
        assert_eq!(binner.value2bin(f64::NAN), None);
        assert!(BinaryHistogramBinner::new(0).is_err());
    }
}
