//! Errors
//!
//! Custom error types used throughout the `prognosis` crate.
use thiserror::Error;

/// Errors that can occur when building spaces, values and distributions.
#[derive(Debug, Error)]
pub enum PrognosisError {
    /// Value lies outside of the bounds of its space.
    #[error("Value {0} is outside of the space [{1}, {2}].")]
    ValueOutOfSpace(f64, f64, f64),
    /// Lower bound is above the upper bound, or one of them is NaN.
    #[error("Invalid space bounds, min {0} must not exceed max {1}.")]
    InvalidBounds(f64, f64),
    /// Bins of zero width cannot carry a density.
    #[error("Unable to bin the empty range [{0}, {1}].")]
    EmptyRange(f64, f64),
    /// A space or binner was asked for zero bins.
    #[error("Number of bins must be positive, got {0}.")]
    InvalidBins(usize),
    /// Equal-width bins cannot be laid over an infinite range.
    #[error("Unable to bin the unbounded range [{0}, {1}].")]
    UnboundedSpace(f64, f64),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Value kind does not match the kind of its space.
    #[error("A {0} value cannot inhabit a {1} space.")]
    TypeMismatch(String, String),
    /// Unable to write config to file.
    #[error("Unable to write config: {0}")]
    UnableToWrite(String),
    /// Unable to read config from file.
    #[error("Unable to read config {0}")]
    UnableToRead(String),
    /// Rayon thread pool could not be created.
    #[error("Unable to build thread pool: {0}")]
    ThreadPool(String),
}
