//! Statistical quality harness
//!
//! Measures avalanche, diffusion, collision and preimage behaviour of any
//! [`KeyedHash`] implementation. All measurements use one testing key so
//! results stay comparable across trials, and all randomness comes from an
//! explicit seed so every run can be replayed.

mod bits;
mod results;
mod sampling;

use std::collections::HashSet;

use keymix_core::{Digest, Key, KeyMix, DIGEST_BITS};
use rand::Rng;
use rand_core::{OsRng, RngCore};
use thiserror::Error;
use tracing::debug;

pub use bits::{bit_difference, flip_bit, hamming_distance};
pub use results::{AvalancheResult, CollisionResult, DiffusionResult, PreimageResult};

use bits::{digest_distance, flip_bit_in_place};
use sampling::{chunk_rng, map_chunks, Stream};

/// Default number of avalanche and diffusion trials
pub const DEFAULT_TRIALS: usize = 100;

/// Default number of collision samples and preimage attempts
pub const DEFAULT_ITERATIONS: u64 = 1_000_000;

/// Default size of each random collision sample in bytes
pub const DEFAULT_SAMPLE_LEN: usize = 16;

/// Default testing key
pub const DEFAULT_TESTING_KEY: &str = "test-key";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessError {
    #[error("length mismatch: {left} bytes vs {right} bytes")]
    LengthMismatch { left: usize, right: usize },
}

/// The hash contract the harness measures: `(input, key) -> 28-byte digest`
pub trait KeyedHash: Send + Sync {
    fn hash(&self, input: &[u8], key: &Key) -> Digest;
}

impl KeyedHash for KeyMix {
    fn hash(&self, input: &[u8], key: &Key) -> Digest {
        KeyMix::hash(self, input, key)
    }
}

impl<F> KeyedHash for F
where
    F: Fn(&[u8], &Key) -> Digest + Send + Sync,
{
    fn hash(&self, input: &[u8], key: &Key) -> Digest {
        self(input, key)
    }
}

/// Runs the quality measurements against one hash function and testing key
pub struct Harness<'h, H: KeyedHash + ?Sized> {
    hasher: &'h H,
    key: Key,
    seed: u64,
    sample_len: usize,
}

impl<'h, H: KeyedHash + ?Sized> Harness<'h, H> {
    /// Create a harness seeded from operating-system entropy
    pub fn new(hasher: &'h H, key: Key) -> Self {
        Self {
            hasher,
            key,
            seed: OsRng.next_u64(),
            sample_len: DEFAULT_SAMPLE_LEN,
        }
    }

    /// Use a fixed seed so results are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Size of each random collision sample
    pub fn with_sample_len(mut self, sample_len: usize) -> Self {
        self.sample_len = sample_len;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn sample_len(&self) -> usize {
        self.sample_len
    }

    /// Hash `input` under the testing key
    pub fn digest(&self, input: &[u8]) -> Digest {
        self.hasher.hash(input, &self.key)
    }

    /// Flip a uniformly random input bit per trial and record how many
    /// digest bits change
    ///
    /// Empty input or zero trials yield an empty result.
    pub fn avalanche(&self, input: &[u8], trials: usize) -> AvalancheResult {
        let bits = input.len() * 8;
        if bits == 0 || trials == 0 {
            return AvalancheResult {
                average: 0.0,
                distances: Vec::new(),
            };
        }
        debug!(trials, input_len = input.len(), "avalanche started");

        let baseline = self.digest(input);
        let per_chunk = map_chunks(trials as u64, |chunk, len| {
            let mut rng = chunk_rng(self.seed, Stream::Avalanche, chunk);
            let mut buf = input.to_vec();
            let mut distances = Vec::with_capacity(len as usize);
            for _ in 0..len {
                let bit = rng.gen_range(0..bits);
                flip_bit_in_place(&mut buf, bit);
                distances.push(digest_distance(&baseline, &self.digest(&buf)));
                flip_bit_in_place(&mut buf, bit);
            }
            distances
        });

        let distances: Vec<u32> = per_chunk.into_iter().flatten().collect();
        let total: u64 = distances.iter().map(|&d| d as u64).sum();
        let average = total as f64 / distances.len() as f64;
        debug!(average, "avalanche finished");

        AvalancheResult { average, distances }
    }

    /// Sweep input bits in order (`i mod bits`) and return the fraction of
    /// digest bits that change per flip, in `[0, 1]`
    ///
    /// Empty input or zero trials yield `0.0`.
    pub fn diffusion(&self, input: &[u8], trials: usize) -> DiffusionResult {
        let bits = input.len() * 8;
        if bits == 0 || trials == 0 {
            return 0.0;
        }
        debug!(trials, input_len = input.len(), "diffusion started");

        let baseline = self.digest(input);
        let mut buf = input.to_vec();
        let mut total: u64 = 0;
        for i in 0..trials {
            let bit = i % bits;
            flip_bit_in_place(&mut buf, bit);
            total += bit_difference(&baseline, &self.digest(&buf)) as u64;
            flip_bit_in_place(&mut buf, bit);
        }

        let diffusion = (total as f64 / trials as f64) / DIGEST_BITS as f64;
        debug!(diffusion, "diffusion finished");
        diffusion
    }

    /// Hash `iterations` random samples and count repeated digests
    pub fn collision(&self, iterations: u64) -> CollisionResult {
        debug!(iterations, sample_len = self.sample_len, "collision sampling started");

        let per_chunk = map_chunks(iterations, |chunk, len| {
            let mut rng = chunk_rng(self.seed, Stream::Collision, chunk);
            let mut buf = vec![0u8; self.sample_len];
            let mut digests = Vec::with_capacity(len as usize);
            for _ in 0..len {
                rng.fill_bytes(&mut buf);
                digests.push(self.digest(&buf));
            }
            digests
        });

        let mut seen: HashSet<Digest> = HashSet::with_capacity(iterations as usize);
        let mut collisions = 0u64;
        for digest in per_chunk.into_iter().flatten() {
            if !seen.insert(digest) {
                collisions += 1;
            }
        }
        debug!(collisions, iterations, "collision sampling finished");

        CollisionResult {
            collisions,
            iterations,
        }
    }

    /// Search for an input of `candidate_len` bytes whose digest equals
    /// `target`, hashing at most `attempts` random candidates
    pub fn preimage(&self, target: &Digest, candidate_len: usize, attempts: u64) -> PreimageResult {
        debug!(candidate_len, attempts, "preimage search started");

        let mut rng = chunk_rng(self.seed, Stream::Preimage, 0);
        let mut candidate = vec![0u8; candidate_len];
        for tries in 1..=attempts {
            rng.fill_bytes(&mut candidate);
            if self.digest(&candidate) == *target {
                debug!(tries, "preimage found");
                return PreimageResult::Found { candidate, tries };
            }
        }

        debug!(attempts, "preimage search exhausted");
        PreimageResult::NotFound {
            tries_exhausted: attempts,
        }
    }
}
