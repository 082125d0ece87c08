/// Default number of display bins of a numeric space.
pub const DEFAULT_BINS: usize = 1000;
/// Default number of buckets of a binary prediction histogram.
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;
/// Beyond this many standard deviations the canonical normal CDF is saturated to 0 or 1.
pub const NORMAL_CDF_SATURATION: f64 = 6.0;
/// Lower tail threshold of the inverse normal CDF approximation.
pub const ICDF_LOWER_TAIL: f64 = 0.02425;
/// Tail mass ignored when integrating moments over an unbounded truncation window.
pub const MOMENT_TAIL_MASS: f64 = 1e-9;
/// Number of sample points used when integrating moments numerically.
pub const MOMENT_STEPS: usize = 2000;
/// Rounding slack allowed when the bin probabilities of a discretized distribution add up past 1.
pub const MASS_TOLERANCE: f64 = 1e-6;
/// Seconds in a day, used by spaces that represent dates.
pub const SECONDS_PER_DAY: f64 = 86400.0;
