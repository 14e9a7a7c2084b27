//! # KeyMix Core Algorithm
//!
//! An experimental keyed byte-mixing hash producing a 224-bit digest.
//!
//! **Not a cryptographic hash.** KeyMix is a non-standardized mixing
//! function whose quality is measured (avalanche, diffusion, collision and
//! preimage sampling in the `keymix` harness), not proven.
//!
//! ## Construction
//!
//! - 7 × 32-bit state words seeded from a fixed constant table
//! - Per input byte: every word is recomputed from a fold over the whole
//!   state, plus a cyclically selected key byte
//! - Fold step: 3 rounds of a rotate/add/non-linear byte mixer
//! - Output: the 7 words serialized big-endian (28 bytes)
//!
//! ## Example
//!
//! ```rust
//! use keymix_core::{Key, KeyMix, hash};
//!
//! // Single-shot hashing
//! let digest = hash(b"input data", b"secret").unwrap();
//!
//! // Reusable hasher with a validated key
//! let key = Key::new(b"secret".to_vec()).unwrap();
//! let hasher = KeyMix::new();
//! assert_eq!(hasher.hash(b"input data", &key), digest);
//! ```

mod error;
mod keymix;
mod params;
mod primitives;

pub use error::HashError;
pub use keymix::{Digest, Key, KeyMix, UpdateOrder, hash};
pub use params::*;
