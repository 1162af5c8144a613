//! Run configuration
//!
//! A [`RunConfig`] fully determines one corruption run. It can be built in
//! code with the `with_*` builders or loaded from a YAML file; the CLI
//! layers explicit flags over either.

use crate::error::CoreError;
use pathfault_bank::{Difficulty, ErrorType};
use pathfault_sampler::{RngStreams, DEFAULT_MIN_PER_CATEGORY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for one corruption run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Reference pathway TSV
    pub pathway: PathBuf,
    /// Corruption bank TSV
    pub bank: PathBuf,
    /// Base output directory; the run writes into a named subdirectory
    pub out_dir: PathBuf,
    /// Error types to introduce
    #[serde(default = "default_error_types")]
    pub error_types: Vec<ErrorType>,
    /// Difficulty of the corruptions to draw
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    /// Fraction (0, 1] of the pathway that should become erroneous
    #[serde(default = "default_fraction")]
    pub fraction: f64,
    /// Sampling seed
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Random stream policy for plan building
    #[serde(default)]
    pub rng_streams: RngStreams,
    /// Minimum errors per category
    #[serde(default = "default_min_per_category")]
    pub min_per_category: usize,
}

fn default_error_types() -> Vec<ErrorType> {
    ErrorType::ALL.to_vec()
}

fn default_difficulty() -> Difficulty {
    Difficulty::One
}

fn default_fraction() -> f64 {
    0.5
}

fn default_seed() -> u64 {
    42
}

fn default_min_per_category() -> usize {
    DEFAULT_MIN_PER_CATEGORY
}

impl RunConfig {
    /// Create a configuration with default sampling parameters
    #[must_use]
    pub fn new(
        pathway: impl Into<PathBuf>,
        bank: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            pathway: pathway.into(),
            bank: bank.into(),
            out_dir: out_dir.into(),
            error_types: default_error_types(),
            difficulty: default_difficulty(),
            fraction: default_fraction(),
            seed: default_seed(),
            rng_streams: RngStreams::default(),
            min_per_category: default_min_per_category(),
        }
    }

    /// With explicit error types
    #[inline]
    #[must_use]
    pub fn with_error_types(mut self, error_types: Vec<ErrorType>) -> Self {
        self.error_types = error_types;
        self
    }

    /// With difficulty
    #[inline]
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// With corruption fraction
    #[inline]
    #[must_use]
    pub fn with_fraction(mut self, fraction: f64) -> Self {
        self.fraction = fraction;
        self
    }

    /// With sampling seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// With random stream policy
    #[inline]
    #[must_use]
    pub fn with_rng_streams(mut self, streams: RngStreams) -> Self {
        self.rng_streams = streams;
        self
    }

    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self, CoreError> {
        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }
}
