//! Core KeyMix Implementation
//!
//! The state is seven 32-bit words seeded from [`INITIAL_STATE`]. For every
//! input byte `u` at 1-indexed position `i`, the keystream byte
//! `k = key[i mod len(key)]` is selected and each word `j` in `0..7` is
//! recomputed as `entangle(u, state) + k`. After the last byte the words are
//! serialized big-endian into a 28-byte digest.

use crate::error::HashError;
use crate::params::*;
use crate::primitives::entangle;

/// A 28-byte KeyMix digest
pub type Digest = [u8; DIGEST_SIZE];

/// A non-empty key, consumed cyclically by the keystream selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(Vec<u8>);

impl Key {
    /// Create a key, rejecting the empty byte sequence
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, HashError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(HashError::InvalidKey);
        }
        Ok(Self(bytes))
    }

    /// Keystream byte for a 1-indexed input position
    #[inline(always)]
    pub fn byte_at(&self, position: usize) -> u8 {
        self.0[position % self.0.len()]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with slices
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = HashError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl TryFrom<&str> for Key {
    type Error = HashError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text.as_bytes())
    }
}

/// Order in which the seven words are recomputed for each input byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UpdateOrder {
    /// Word `j` reads words `0..j` already updated for the current byte.
    /// This is the KeyMix definition.
    #[default]
    Sequential,
    /// Every word reads the state as it was before the current byte.
    /// All seven words end up equal after the first byte.
    Snapshot,
}

/// KeyMix hasher
///
/// Holds no per-call state: every [`KeyMix::hash`] call works on its own
/// copy of [`INITIAL_STATE`], so one instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyMix {
    order: UpdateOrder,
}

impl KeyMix {
    /// Create a hasher using the sequential update order
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with an explicit update order
    pub fn with_order(order: UpdateOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> UpdateOrder {
        self.order
    }

    /// Compute the digest of `input` under `key`
    ///
    /// Empty input never enters the mixing loop and yields the serialized
    /// initial state.
    pub fn hash(&self, input: &[u8], key: &Key) -> Digest {
        let mut state = INITIAL_STATE;

        for (index, &byte) in input.iter().enumerate() {
            let u = byte as u32;
            let k = key.byte_at(index + 1) as u32;

            match self.order {
                UpdateOrder::Sequential => absorb_sequential(&mut state, u, k),
                UpdateOrder::Snapshot => absorb_snapshot(&mut state, u, k),
            }
        }

        serialize(&state)
    }
}

/// Recompute each word in place; later words see earlier updates
#[inline(always)]
#[allow(clippy::needless_range_loop)]
fn absorb_sequential(state: &mut [u32; STATE_WORDS], u: u32, k: u32) {
    for j in 0..STATE_WORDS {
        state[j] = entangle(u, state).wrapping_add(k);
    }
}

/// Recompute each word from a copy taken before the pass
#[inline(always)]
fn absorb_snapshot(state: &mut [u32; STATE_WORDS], u: u32, k: u32) {
    let snapshot = *state;
    for word in state.iter_mut() {
        *word = entangle(u, &snapshot).wrapping_add(k);
    }
}

/// Serialize the state words big-endian
#[inline(always)]
fn serialize(state: &[u32; STATE_WORDS]) -> Digest {
    let mut digest = [0u8; DIGEST_SIZE];
    for (chunk, word) in digest.chunks_exact_mut(4).zip(state.iter()) {
        chunk.copy_from_slice(&word.to_be_bytes());
    }
    digest
}

/// Convenience function for single-shot hashing
///
/// Fails only when `key` is empty.
///
/// # Example
///
/// ```rust
/// use keymix_core::{hash, HashError, DIGEST_SIZE};
///
/// let digest = hash(b"hello", b"test-key").unwrap();
/// assert_eq!(digest.len(), DIGEST_SIZE);
///
/// assert_eq!(hash(b"hello", b""), Err(HashError::InvalidKey));
/// ```
pub fn hash(input: &[u8], key: &[u8]) -> Result<Digest, HashError> {
    let key = Key::new(key)?;
    Ok(KeyMix::new().hash(input, &key))
}
