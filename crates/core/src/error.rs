//! Error types for KeyMix

use thiserror::Error;

/// Errors raised by the hash contract
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashError {
    /// The keystream is consumed cyclically, so it needs at least one byte
    #[error("invalid key: key must contain at least one byte")]
    InvalidKey,
}
