//! Calibration bins
//!
//! Six fixed confidence brackets covering `[0.5, 1.0]`.
use serde::{Deserialize, Serialize};

/// A confidence bracket. Ranges are half-open except the last one, which
/// includes 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CalibrationBin {
    #[serde(rename = "BIN_52")]
    Bin52,
    #[serde(rename = "BIN_60")]
    Bin60,
    #[serde(rename = "BIN_70")]
    Bin70,
    #[serde(rename = "BIN_80")]
    Bin80,
    #[serde(rename = "BIN_90")]
    Bin90,
    #[serde(rename = "BIN_97")]
    Bin97,
}

impl CalibrationBin {
    /// Every bin in ascending order of confidence.
    pub const ALL: [CalibrationBin; 6] = [
        CalibrationBin::Bin52,
        CalibrationBin::Bin60,
        CalibrationBin::Bin70,
        CalibrationBin::Bin80,
        CalibrationBin::Bin90,
        CalibrationBin::Bin97,
    ];

    /// Lower and upper bound of the bracket.
    pub fn range(&self) -> (f64, f64) {
        match self {
            CalibrationBin::Bin52 => (0.50, 0.55),
            CalibrationBin::Bin60 => (0.55, 0.65),
            CalibrationBin::Bin70 => (0.65, 0.75),
            CalibrationBin::Bin80 => (0.75, 0.85),
            CalibrationBin::Bin90 => (0.85, 0.95),
            CalibrationBin::Bin97 => (0.95, 1.00),
        }
    }

    /// Representative confidence of the bracket.
    pub fn mid(&self) -> f64 {
        let (start, end) = self.range();
        (start + end) / 2.0
    }

    pub fn contains(&self, p: f64) -> bool {
        let (start, end) = self.range();
        match self {
            CalibrationBin::Bin97 => start <= p && p <= end,
            _ => start <= p && p < end,
        }
    }

    /// Bin of a probability together with the answer it predicts.
    ///
    /// Probabilities below one half predict "no" with confidence `1 - p`. A
    /// probability of exactly one half carries no direction and has no bin.
    pub fn find(p: f64) -> Option<(CalibrationBin, bool)> {
        if p.is_nan() || p == 0.5 {
            None
        } else if p < 0.5 {
            CalibrationBin::find(1.0 - p).map(|(bin, _)| (bin, false))
        } else {
            CalibrationBin::ALL
                .iter()
                .find(|bin| bin.contains(p))
                .map(|bin| (*bin, true))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        assert_eq!(CalibrationBin::find(0.7), Some((CalibrationBin::Bin70, true)));
        assert_eq!(CalibrationBin::find(0.3), Some((CalibrationBin::Bin70, false)));
        assert_eq!(CalibrationBin::find(0.5), None);
        assert_eq!(CalibrationBin::find(0.51), Some((CalibrationBin::Bin52, true)));
        assert_eq!(CalibrationBin::find(1.0), Some((CalibrationBin::Bin97, true)));
        assert_eq!(CalibrationBin::find(0.0), Some((CalibrationBin::Bin97, false)));
        assert_eq!(CalibrationBin::find(0.95), Some((CalibrationBin::Bin97, true)));
        assert_eq!(CalibrationBin::find(0.65), Some((CalibrationBin::Bin70, true)));
    }

    #[test]
    fn test_find_out_of_range() {
        assert_eq!(CalibrationBin::find(1.2), None);
        assert_eq!(CalibrationBin::find(-0.2), None);
        assert_eq!(CalibrationBin::find(f64::NAN), None);
    }

    #[test]
    fn test_mids_fall_in_their_bins() {
        for bin in CalibrationBin::ALL {
            assert!(bin.contains(bin.mid()));
            assert_eq!(CalibrationBin::find(bin.mid()), Some((bin, true)));
        }
        assert!((CalibrationBin::Bin52.mid() - 0.525).abs() < 1e-12);
        assert!((CalibrationBin::Bin97.mid() - 0.975).abs() < 1e-12);
    }

    #[test]
    fn test_bins_cover_upper_half() {
        let mut p = 0.5;
        while p <= 1.0 {
            let hits = CalibrationBin::ALL.iter().filter(|b| b.contains(p)).count();
            assert_eq!(hits, 1, "p = {}", p);
            p += 0.001;
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&CalibrationBin::Bin70).unwrap(), "\"BIN_70\"");
        let b: CalibrationBin = serde_json::from_str("\"BIN_97\"").unwrap();
        assert_eq!(b, CalibrationBin::Bin97);
    }
}
