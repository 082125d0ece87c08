//! Calibration vectors
//!
//! Per-bin counts of correct and incorrect predictions. Vectors form a
//! commutative monoid under `+`, so they can be reduced in any order.
use crate::calibration::bin::CalibrationBin;
use crate::distribution::ContinuousDistribution;
use hashbrown::HashMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Index};

static EMPTY_ENTRY: CalibrationEntry = CalibrationEntry {
    incorrect: 0,
    correct: 0,
};

/// Tally of predictions falling into one bin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalibrationEntry {
    #[serde(default)]
    pub incorrect: u64,
    #[serde(default)]
    pub correct: u64,
}

impl CalibrationEntry {
    pub fn new(incorrect: u64, correct: u64) -> Self {
        CalibrationEntry { incorrect, correct }
    }

    /// A single observation.
    pub fn observation(correct: bool) -> Self {
        if correct {
            CalibrationEntry::new(0, 1)
        } else {
            CalibrationEntry::new(1, 0)
        }
    }

    pub fn count(&self) -> u64 {
        self.incorrect + self.correct
    }

    /// Share of correct predictions, `None` without any.
    pub fn success_rate(&self) -> Option<f64> {
        match self.count() {
            0 => None,
            n => Some(self.correct as f64 / n as f64),
        }
    }
}

impl Add for CalibrationEntry {
    type Output = CalibrationEntry;

    fn add(self, rhs: Self) -> Self::Output {
        CalibrationEntry {
            incorrect: self.incorrect + rhs.incorrect,
            correct: self.correct + rhs.correct,
        }
    }
}

impl AddAssign for CalibrationEntry {
    fn add_assign(&mut self, rhs: Self) {
        self.incorrect += rhs.incorrect;
        self.correct += rhs.correct;
    }
}

impl Sum for CalibrationEntry {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CalibrationEntry::default(), Add::add)
    }
}

/// Calibration counts for every bin. Bins without observations are implicit zeros.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CalibrationVector {
    entries: HashMap<CalibrationBin, CalibrationEntry>,
}

impl CalibrationVector {
    pub fn new() -> Self {
        CalibrationVector::default()
    }

    /// Vector holding a single binary prediction.
    ///
    /// * `probability` - Predicted probability of "yes".
    /// * `resolution` - Whether the question resolved "yes".
    ///
    /// A probability without a bin, such as exactly one half, leaves the vector empty.
    pub fn from_observation(probability: f64, resolution: bool) -> Self {
        let mut v = CalibrationVector::new();
        if let Some((bin, predicted)) = CalibrationBin::find(probability) {
            v.record(bin, predicted == resolution);
        }
        v
    }

    /// Vector of a continuous prediction, one observation per bin.
    pub fn from_numeric(dist: &dyn ContinuousDistribution, resolution: f64) -> Self {
        numeric2binary(dist, resolution)
            .into_iter()
            .map(|(p, hit)| CalibrationVector::from_observation(p, hit))
            .sum()
    }

    pub fn record(&mut self, bin: CalibrationBin, correct: bool) {
        *self.entries.entry(bin).or_default() += CalibrationEntry::observation(correct);
    }

    pub fn get(&self, bin: CalibrationBin) -> CalibrationEntry {
        self[bin]
    }

    /// All bins in ascending order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (CalibrationBin, CalibrationEntry)> + '_ {
        CalibrationBin::ALL.iter().map(move |bin| (*bin, self[*bin]))
    }

    /// Sum over all bins.
    pub fn total(&self) -> CalibrationEntry {
        self.entries.values().copied().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total().count() == 0
    }
}

impl Index<CalibrationBin> for CalibrationVector {
    type Output = CalibrationEntry;

    fn index(&self, bin: CalibrationBin) -> &Self::Output {
        self.entries.get(&bin).unwrap_or(&EMPTY_ENTRY)
    }
}

impl PartialEq for CalibrationVector {
    fn eq(&self, other: &Self) -> bool {
        CalibrationBin::ALL.iter().all(|bin| self[*bin] == other[*bin])
    }
}

impl Eq for CalibrationVector {}

impl Add for CalibrationVector {
    type Output = CalibrationVector;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for CalibrationVector {
    fn add_assign(&mut self, rhs: Self) {
        for (bin, entry) in rhs.entries {
            *self.entries.entry(bin).or_default() += entry;
        }
    }
}

impl Sum for CalibrationVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CalibrationVector::new(), Add::add)
    }
}

// Every bin is written, empty ones as zeros.
impl Serialize for CalibrationVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CalibrationBin::ALL.len()))?;
        for (bin, entry) in self.iter() {
            map.serialize_entry(&bin, &entry)?;
        }
        map.end()
    }
}

/// Reduce a continuous prediction to one binary prediction per calibration bin.
///
/// For each bin the prediction claims, with the bin's mid confidence, that the
/// resolution lies inside the central confidence interval of that size.
pub fn numeric2binary(dist: &dyn ContinuousDistribution, resolution: f64) -> Vec<(f64, bool)> {
    CalibrationBin::ALL
        .iter()
        .map(|bin| {
            let confidence = bin.mid();
            (confidence, dist.confidence_interval(confidence).contains(&resolution))
        })
        .collect()
}
