//! KeyMix Harness Library
//!
//! Statistical quality measurements for keyed 28-byte hash functions, with
//! the KeyMix mixing hash as the built-in subject.
//!
//! # Overview
//!
//! KeyMix is an experimental, non-cryptographic keyed mixing hash. This
//! crate measures it (or any other [`KeyedHash`]) instead of trusting it:
//!
//! - **Avalanche**: random single-bit flips, mean Hamming distance
//! - **Diffusion**: sequential bit sweep, fraction of digest bits changed
//! - **Collision**: repeated digests among random samples
//! - **Preimage**: bounded brute-force search for a target digest
//!
//! # Example
//!
//! ```rust
//! use keymix::algorithm::{Key, KeyMix};
//! use keymix::harness::Harness;
//!
//! let hasher = KeyMix::new();
//! let harness = Harness::new(&hasher, Key::new("test-key").unwrap()).with_seed(42);
//!
//! let avalanche = harness.avalanche(b"hello world!", 100);
//! assert!(avalanche.percentage() > 20.0);
//!
//! let diffusion = harness.diffusion(b"hello world!", 100);
//! assert!((0.0..=1.0).contains(&diffusion));
//! ```

// Re-export the core algorithm
pub use keymix_core as algorithm;

pub mod config;
pub mod harness;
pub mod registry;
pub mod report;

// Convenience re-exports
pub use algorithm::{hash, Digest, Key, KeyMix};
pub use harness::{Harness, KeyedHash};
