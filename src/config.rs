//! Config
//!
//! Engine settings shared by batch operations, with JSON persistence.
use crate::constants::DEFAULT_HISTOGRAM_BINS;
use crate::errors::PrognosisError;
use rayon::ThreadPool;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_histogram_bins() -> usize {
    DEFAULT_HISTOGRAM_BINS
}
fn default_include_numeric() -> bool {
    true
}
fn default_parallel() -> bool {
    true
}

/// Configuration for group aggregation, histograms and calibration batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Buckets of a binary prediction histogram.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// Whether numeric questions contribute to aggregated calibration.
    #[serde(default = "default_include_numeric")]
    pub include_numeric: bool,
    /// Whether batch operations run on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Size of a dedicated thread pool. `None` uses the global pool.
    #[serde(default)]
    pub num_threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            include_numeric: true,
            parallel: true,
            num_threads: None,
        }
    }
}

impl EngineConfig {
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn set_include_numeric(mut self, include_numeric: bool) -> Self {
        self.include_numeric = include_numeric;
        self
    }

    pub fn set_histogram_bins(mut self, histogram_bins: usize) -> Self {
        self.histogram_bins = histogram_bins;
        self
    }

    /// Dedicated thread pool, if `num_threads` asks for one.
    pub(crate) fn thread_pool(&self) -> Result<Option<ThreadPool>, PrognosisError> {
        match self.num_threads {
            Some(num_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map(Some)
                .map_err(|e| PrognosisError::ThreadPool(e.to_string())),
            None => Ok(None),
        }
    }

    /// Run `op` on the configured pool.
    pub(crate) fn install<OP, R>(&self, op: OP) -> Result<R, PrognosisError>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self.thread_pool()? {
            Some(pool) => Ok(pool.install(op)),
            None => Ok(op()),
        }
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Save as a json object to a file.
    ///
    /// * `path` - Path to save to.
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PrognosisError> {
        fs::write(path, self.json_dump()?).map_err(|e| PrognosisError::UnableToWrite(e.to_string()))
    }

    /// Dump as a json string.
    fn json_dump(&self) -> Result<String, PrognosisError> {
        serde_json::to_string(self).map_err(|e| PrognosisError::UnableToWrite(e.to_string()))
    }

    /// Load from a json string.
    fn from_json(json_str: &str) -> Result<Self, PrognosisError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| PrognosisError::UnableToRead(e.to_string()))
    }

    /// Load from a path to a json file.
    ///
    /// * `path` - Path to load from.
    fn load<P: AsRef<Path>>(path: P) -> Result<Self, PrognosisError> {
        let json_str = fs::read_to_string(path).map_err(|e| PrognosisError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for EngineConfig {}
