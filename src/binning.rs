//! Binning
//!
//! Equal-width partition of a bounded numeric range. A `Binner` is a cheap
//! `Copy` view, create one whenever a bin count is needed.
use crate::errors::PrognosisError;
use crate::space::NumericSpace;
use std::ops::Range;

/// Equal-width bins over `[min, max]`.
///
/// Bins are half-open `[start, start + bin_size)`, except the last one which
/// also contains `max`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Binner {
    min: f64,
    max: f64,
    bins: usize,
    bin_size: f64,
}

impl Binner {
    /// Partition a numeric space into `bins` equal-width bins.
    ///
    /// * `space` - Space to partition, both bounds must be finite.
    /// * `bins` - Number of bins, must be positive.
    pub fn new(space: &NumericSpace, bins: usize) -> Result<Self, PrognosisError> {
        Self::from_bounds(space.min(), space.max(), bins)
    }

    pub fn from_bounds(min: f64, max: f64, bins: usize) -> Result<Self, PrognosisError> {
        if bins == 0 {
            return Err(PrognosisError::InvalidBins(bins));
        }
        if min.is_nan() || max.is_nan() || min > max {
            return Err(PrognosisError::InvalidBounds(min, max));
        }
        if min.is_infinite() || max.is_infinite() {
            return Err(PrognosisError::UnboundedSpace(min, max));
        }
        Ok(Binner {
            min,
            max,
            bins,
            bin_size: (max - min) / bins as f64,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    /// Range of the bin at `index`. The last bin ends exactly at `max`.
    pub fn bin_range(&self, index: usize) -> Range<f64> {
        let start = self.min + self.bin_size * index as f64;
        let end = if index + 1 == self.bins {
            self.max
        } else {
            start + self.bin_size
        };
        start..end
    }

    /// All bin ranges in ascending order.
    pub fn bin_ranges(&self) -> impl Iterator<Item = Range<f64>> {
        let binner = *self;
        (0..self.bins).map(move |i| binner.bin_range(i))
    }

    /// The `bins + 1` bin borders, from `min` to `max`.
    pub fn bin_borders(&self) -> impl Iterator<Item = f64> {
        let binner = *self;
        (0..=self.bins).map(move |i| {
            if i == binner.bins {
                binner.max
            } else {
                binner.min + binner.bin_size * i as f64
            }
        })
    }

    /// Midpoint of every bin.
    pub fn bin_midpoints(&self) -> impl Iterator<Item = f64> {
        let binner = *self;
        (0..self.bins).map(move |i| binner.min + binner.bin_size * i as f64 + binner.bin_size / 2.0)
    }

    /// Index of the bin containing `value`, `None` outside of `[min, max]`.
    ///
    /// `max` itself belongs to the last bin.
    pub fn value2bin(&self, value: f64) -> Option<usize> {
        if value.is_nan() || value < self.min || value > self.max {
            return None;
        }
        if self.bin_size == 0.0 {
            return Some(0);
        }
        let index = ((value - self.min) / self.bin_size).floor() as usize;
        Some(index.min(self.bins - 1))
    }
}
