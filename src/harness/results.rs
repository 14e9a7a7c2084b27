//! Measurement results

use keymix_core::DIGEST_BITS;
use serde::Serialize;

/// Outcome of the random bit-flip avalanche measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvalancheResult {
    /// Mean Hamming distance between baseline and mutated digests
    pub average: f64,
    /// Per-trial Hamming distances, in trial order
    pub distances: Vec<u32>,
}

impl AvalancheResult {
    /// Average distance as a percentage of the digest bits
    pub fn percentage(&self) -> f64 {
        self.average / DIGEST_BITS as f64 * 100.0
    }
}

/// Fraction of digest bits expected to change per input-bit flip, in `[0, 1]`
pub type DiffusionResult = f64;

/// Outcome of collision sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CollisionResult {
    pub collisions: u64,
    pub iterations: u64,
}

impl CollisionResult {
    /// Collisions per sample; zero when nothing was sampled
    pub fn rate(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.collisions as f64 / self.iterations as f64
    }
}

/// Outcome of a bounded preimage search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PreimageResult {
    Found {
        #[serde(serialize_with = "hex::serialize")]
        candidate: Vec<u8>,
        tries: u64,
    },
    NotFound {
        tries_exhausted: u64,
    },
}

impl PreimageResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Candidates hashed before the search stopped
    pub fn tries(&self) -> u64 {
        match self {
            Self::Found { tries, .. } => *tries,
            Self::NotFound { tries_exhausted } => *tries_exhausted,
        }
    }
}
