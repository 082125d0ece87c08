//! Answer spaces
//!
//! The domain of valid answers to a question: a yes/no outcome or a bounded
//! or unbounded numeric range.
use crate::binning::Binner;
use crate::constants::{DEFAULT_BINS, SECONDS_PER_DAY};
use crate::errors::PrognosisError;
use crate::utils::to_fixed;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Domain of an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Space {
    /// Yes/no outcome.
    Binary,
    /// Numeric outcome within `[min, max]`.
    Numeric(NumericSpace),
}

impl Space {
    /// Number of display bins of the space.
    pub fn bins(&self) -> usize {
        match self {
            Space::Binary => 2,
            Space::Numeric(s) => s.bins,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Space::Binary => "binary",
            Space::Numeric(_) => "numeric",
        }
    }

    /// Is `value` a valid inhabitant of this space.
    pub fn check_value(&self, value: &Value) -> bool {
        match (self, value) {
            (Space::Binary, Value::Binary(_)) => true,
            (Space::Numeric(s), Value::Numeric(v)) => s.check_value(v.value()),
            _ => false,
        }
    }

    /// Bin of `value` using the default bin count of the space.
    pub fn value2bin(&self, value: &Value) -> Option<usize> {
        if !self.check_value(value) {
            return None;
        }
        match (self, value) {
            (Space::Binary, Value::Binary(b)) => Some(usize::from(b.value)),
            (Space::Numeric(s), Value::Numeric(v)) => s.value2bin(v.value()),
            _ => None,
        }
    }

    /// Human readable form of `value`, `(invalid)` when it does not belong here.
    pub fn format_value(&self, value: &Value) -> String {
        if !self.check_value(value) {
            return String::from("(invalid)");
        }
        match (self, value) {
            (Space::Binary, Value::Binary(b)) => format_binary(b.value),
            (Space::Numeric(s), Value::Numeric(v)) => s.format_value(v.value()),
            _ => String::from("(invalid)"),
        }
    }
}

pub(crate) fn format_binary(value: bool) -> String {
    if value {
        String::from("Yes")
    } else {
        String::from("No")
    }
}

fn default_min() -> f64 {
    f64::NEG_INFINITY
}
fn default_max() -> f64 {
    f64::INFINITY
}
fn default_bins() -> usize {
    DEFAULT_BINS
}
fn default_decimals() -> usize {
    1
}

// Infinite bounds are written as null by serde_json.
fn parse_lower_bound<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(d).map(|x: Option<_>| x.unwrap_or(f64::NEG_INFINITY))
}

fn parse_upper_bound<'de, D>(d: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(d).map(|x: Option<_>| x.unwrap_or(f64::INFINITY))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNumericSpace {
    #[serde(default = "default_min", deserialize_with = "parse_lower_bound")]
    min: f64,
    #[serde(default = "default_max", deserialize_with = "parse_upper_bound")]
    max: f64,
    #[serde(default = "default_bins")]
    bins: usize,
    #[serde(default)]
    represents_days: bool,
    #[serde(default)]
    unit: String,
    #[serde(default = "default_decimals")]
    decimals: usize,
}

impl TryFrom<RawNumericSpace> for NumericSpace {
    type Error = PrognosisError;

    fn try_from(raw: RawNumericSpace) -> Result<Self, Self::Error> {
        let mut space = NumericSpace::new(raw.min, raw.max, raw.bins)?;
        space.represents_days = raw.represents_days;
        space.unit = raw.unit;
        space.decimals = raw.decimals;
        Ok(space)
    }
}

/// Numeric range of answers. Either bound may be infinite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNumericSpace", rename_all = "camelCase")]
pub struct NumericSpace {
    min: f64,
    max: f64,
    bins: usize,
    represents_days: bool,
    unit: String,
    decimals: usize,
}

/// The whole real line, used by distributions that are not tied to a question.
pub static UNBOUNDED: NumericSpace = NumericSpace::unbounded();

impl NumericSpace {
    /// Create a numeric space.
    ///
    /// * `min` - Lower bound, may be negative infinity.
    /// * `max` - Upper bound, may be infinity, must not be below `min`.
    /// * `bins` - Number of display bins, must be positive.
    pub fn new(min: f64, max: f64, bins: usize) -> Result<Self, PrognosisError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(PrognosisError::InvalidBounds(min, max));
        }
        if bins == 0 {
            return Err(PrognosisError::InvalidBins(bins));
        }
        Ok(NumericSpace {
            min,
            max,
            bins,
            represents_days: false,
            unit: String::new(),
            decimals: 1,
        })
    }

    pub const fn unbounded() -> Self {
        NumericSpace {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            bins: DEFAULT_BINS,
            represents_days: false,
            unit: String::new(),
            decimals: 1,
        }
    }

    /// A space of dates, stored as unix seconds, with one bin per day.
    pub fn from_dates(min_date: NaiveDate, max_date: NaiveDate) -> Result<Self, PrognosisError> {
        let epoch = NaiveDate::default();
        let min = (min_date - epoch).num_days() as f64 * SECONDS_PER_DAY;
        let max = (max_date - epoch).num_days() as f64 * SECONDS_PER_DAY;
        let days = (max_date - min_date).num_days();
        let bins = usize::try_from(days).map_err(|_| PrognosisError::InvalidBounds(min, max))?;
        let mut space = NumericSpace::new(min, max, bins)?;
        space.represents_days = true;
        Ok(space)
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = unit.to_string();
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Result<Self, PrognosisError> {
        if bins == 0 {
            return Err(PrognosisError::InvalidBins(bins));
        }
        self.bins = bins;
        Ok(self)
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

    pub fn represents_days(&self) -> bool {
        self.represents_days
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    pub fn is_infinite(&self) -> bool {
        self.min.is_infinite() || self.max.is_infinite()
    }

    pub fn check_value(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Binner using the default bin count of the space.
    pub fn binner(&self) -> Result<Binner, PrognosisError> {
        Binner::new(self, self.bins)
    }

    /// Bin of `value` with the default bin count. `None` for values outside the
    /// space and for unbounded spaces.
    pub fn value2bin(&self, value: f64) -> Option<usize> {
        self.binner().ok()?.value2bin(value)
    }

    /// Bin of `value` with an explicit bin count.
    pub fn value2bin_with(&self, value: f64, bins: usize) -> Option<usize> {
        Binner::new(self, bins).ok()?.value2bin(value)
    }

    /// Restrict the space to `[min, max]`. The requested bounds are clamped to
    /// the current ones, so the result is never wider.
    pub fn subspace(&self, min: f64, max: f64) -> Result<Self, PrognosisError> {
        let new_min = if min.is_nan() { min } else { min.clamp(self.min, self.max) };
        let new_max = if max.is_nan() { max } else { max.clamp(self.min, self.max) };
        if new_min.is_nan() || new_max.is_nan() || new_min > new_max {
            return Err(PrognosisError::InvalidBounds(min, max));
        }
        Ok(NumericSpace {
            min: new_min,
            max: new_max,
            ..self.clone()
        })
    }

    /// Same space metadata with the bounds and bin count of `binner`.
    pub(crate) fn rebinned(&self, binner: &Binner) -> NumericSpace {
        NumericSpace {
            min: binner.min(),
            max: binner.max(),
            bins: binner.bins(),
            ..self.clone()
        }
    }

    pub fn format_value(&self, value: f64) -> String {
        if self.represents_days {
            return match DateTime::<Utc>::from_timestamp(value as i64, 0) {
                Some(dt) => dt.date_naive().to_string(),
                None => String::from("(invalid)"),
            };
        }
        self.with_unit_suffix(to_fixed(value, self.decimals))
    }

    /// Format the width of an interval in this space.
    pub fn format_difference(&self, value: f64) -> String {
        if self.represents_days {
            return format!("{} days", to_fixed(value / SECONDS_PER_DAY, 1));
        }
        self.with_unit_suffix(to_fixed(value, self.decimals))
    }

    fn with_unit_suffix(&self, mut s: String) -> String {
        if !self.unit.is_empty() {
            s.push(' ');
            s.push_str(&self.unit);
        }
        s
    }
}

impl Default for NumericSpace {
    fn default() -> Self {
        NumericSpace::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_space_validation() {
        assert!(NumericSpace::new(0.0, 1.0, 10).is_ok());
        assert!(NumericSpace::new(1.0, 0.0, 10).is_err());
        assert!(NumericSpace::new(0.0, 1.0, 0).is_err());
        assert!(NumericSpace::new(f64::NAN, 1.0, 10).is_err());
        assert!(NumericSpace::new(f64::NEG_INFINITY, f64::INFINITY, 10).is_ok());
    }

    #[test]
    fn test_check_value() {
        let space = NumericSpace::new(0.0, 10.0, 10).unwrap();
        assert!(space.check_value(0.0));
        assert!(space.check_value(10.0));
        assert!(!space.check_value(10.5));
        assert!(!space.check_value(f64::NAN));
        assert!(UNBOUNDED.check_value(1e300));
        assert!(UNBOUNDED.is_infinite());
    }

    #[test]
    fn test_value2bin() {
        let space = NumericSpace::new(0.0, 10.0, 5).unwrap();
        assert_eq!(space.value2bin(3.0), Some(1));
        assert_eq!(space.value2bin(10.0), Some(4));
        assert_eq!(space.value2bin(11.0), None);
        assert_eq!(space.value2bin_with(3.0, 10), Some(3));
        assert_eq!(UNBOUNDED.value2bin(3.0), None);

        let binary = Space::Binary;
        assert_eq!(binary.value2bin(&Value::binary(true)), Some(1));
        assert_eq!(binary.value2bin(&Value::binary(false)), Some(0));
        let numeric = Space::Numeric(space.clone());
        assert_eq!(numeric.value2bin(&Value::binary(true)), None);
        let v = Value::numeric(&space, 7.0).unwrap();
        assert_eq!(numeric.value2bin(&v), Some(3));
        assert!(!binary.check_value(&v));
    }

    #[test]
    fn test_subspace_never_widens() {
        let space = NumericSpace::new(0.0, 10.0, 10).unwrap();
        let sub = space.subspace(-5.0, 4.0).unwrap();
        assert_eq!(sub.min(), 0.0);
        assert_eq!(sub.max(), 4.0);
        let sub = space.subspace(2.0, 50.0).unwrap();
        assert_eq!(sub.min(), 2.0);
        assert_eq!(sub.max(), 10.0);
        assert!(space.subspace(6.0, 4.0).is_err());
    }

    #[test]
    fn test_format_value() {
        let space = NumericSpace::new(0.0, 100.0, 10).unwrap().with_unit("kg").with_decimals(2);
        assert_eq!(space.format_value(3.14159), "3.14 kg");
        assert_eq!(space.format_difference(2.0), "2.00 kg");
        let plain = NumericSpace::new(0.0, 100.0, 10).unwrap();
        assert_eq!(plain.format_value(2.26), "2.3");
        assert_eq!(Space::Binary.format_value(&Value::binary(true)), "Yes");
        assert_eq!(Space::Binary.format_value(&Value::binary(false)), "No");
        let numeric = Space::Numeric(plain);
        assert_eq!(numeric.format_value(&Value::binary(true)), "(invalid)");
    }

    #[test]
    fn test_from_dates() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let space = NumericSpace::from_dates(start, end).unwrap();
        assert_eq!(space.bins(), 30);
        assert!(space.represents_days());
        assert_eq!(space.min(), 1672531200.0);
        assert_eq!(space.format_value(space.min()), "2023-01-01");
        assert_eq!(space.format_difference(2.0 * SECONDS_PER_DAY), "2.0 days");
        assert!(NumericSpace::from_dates(end, start).is_err());
    }

    #[test]
    fn test_serde_round_trip_unbounded() {
        let space = Space::Numeric(NumericSpace::new(f64::NEG_INFINITY, 5.0, 20).unwrap().with_unit("m"));
        let json = serde_json::to_string(&space).unwrap();
        assert!(json.contains("\"type\":\"numeric\""));
        assert!(json.contains("\"min\":null"));
        let back: Space = serde_json::from_str(&json).unwrap();
        assert_eq!(back, space);
    }

    #[test]
    fn test_deserialize_rejects_invalid_bounds() {
        let json = r#"{"type": "numeric", "min": 5.0, "max": 1.0}"#;
        assert!(serde_json::from_str::<Space>(json).is_err());
        let json = r#"{"type": "numeric", "max": 1.0}"#;
        let space: Space = serde_json::from_str(json).unwrap();
        match space {
            Space::Numeric(s) => {
                assert_eq!(s.min(), f64::NEG_INFINITY);
                assert_eq!(s.bins(), DEFAULT_BINS);
                assert_eq!(s.decimals(), 1);
            }
            Space::Binary => panic!("expected a numeric space"),
        }
        let binary: Space = serde_json::from_str(r#"{"type": "binary"}"#).unwrap();
        assert_eq!(binary, Space::Binary);
    }
}
