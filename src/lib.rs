// Modules
pub mod binning;
pub mod calibration;
pub mod config;
pub mod constants;
pub mod distribution;
pub mod errors;
pub mod group;
pub mod histogram;
pub mod question;
pub mod score;
pub mod space;
pub mod utils;
pub mod value;

// Individual classes, and functions
pub use binning::Binner;
pub use calibration::{
    aggregate_calibration, calibration_details, get_calibration, CalibrationBin, CalibrationEntry, CalibrationVector,
};
pub use config::{ConfigIO, EngineConfig};
pub use distribution::{
    BinaryDistribution, ContinuousDistribution, DiscretizedContinuousDistribution, NormalDistribution,
    PointEstimateDistribution, ProbabilityDistribution, TruncatedNormalDistribution,
};
pub use errors::PrognosisError;
pub use group::group_distribution;
pub use histogram::{BinaryHistogram, BinaryHistogramBinner};
pub use question::Question;
pub use score::{get_score, normalized_brier};
pub use space::{NumericSpace, Space};
pub use value::Value;
