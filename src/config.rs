//! Harness configuration
//!
//! Defaults can be overridden from a JSON file, then from command-line flags.

use std::path::{Path, PathBuf};

use keymix_core::{HashError, Key};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::harness::{
    Harness, KeyedHash, DEFAULT_ITERATIONS, DEFAULT_SAMPLE_LEN, DEFAULT_TESTING_KEY,
    DEFAULT_TRIALS,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Measurement parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Testing key used for every measurement
    pub key: String,
    /// Avalanche and diffusion trials
    pub trials: usize,
    /// Collision samples and preimage attempts
    pub iterations: u64,
    /// Bytes per random collision sample
    pub sample_len: usize,
    /// Fixed seed; drawn from the operating system when absent
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_TESTING_KEY.to_string(),
            trials: DEFAULT_TRIALS,
            iterations: DEFAULT_ITERATIONS,
            sample_len: DEFAULT_SAMPLE_LEN,
            seed: None,
        }
    }
}

impl HarnessConfig {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Build a harness for `hasher` from this config
    pub fn harness<'h, H: KeyedHash + ?Sized>(
        &self,
        hasher: &'h H,
    ) -> Result<Harness<'h, H>, HashError> {
        let key = Key::new(self.key.as_bytes())?;
        let harness = Harness::new(hasher, key).with_sample_len(self.sample_len);
        Ok(match self.seed {
            Some(seed) => harness.with_seed(seed),
            None => harness,
        })
    }
}
