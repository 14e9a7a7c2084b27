//! KeyMix Algorithm Parameters
//!
//! Fixed, process-wide constants. Every hash call copies [`INITIAL_STATE`]
//! into its own working state; nothing here is ever mutated.

/// Number of 32-bit words in the hash state
pub const STATE_WORDS: usize = 7;

/// Digest size in bytes (7 big-endian words)
pub const DIGEST_SIZE: usize = STATE_WORDS * 4;

/// Digest size in bits
pub const DIGEST_BITS: usize = DIGEST_SIZE * 8;

/// Initial state words (the first seven SHA-224 initial hash values)
pub const INITIAL_STATE: [u32; STATE_WORDS] = [
    0xC105_9ED8,
    0x367C_D507,
    0x3070_DD17,
    0xF70E_5939,
    0xFFC0_0B31,
    0x6858_1511,
    0x64F9_8FA7,
];

/// Multiplier applied to the combined alpha/beta term
pub const SCALE: u32 = 0x9E37_79B9;

/// Multiplier applied to the input byte
pub const GROW: u32 = 0x85EB_CA6B;

/// XOR mask applied before the non-linear rotation
pub const FLIP: u32 = 0xC2B2_AE35;

/// AND mask closing the non-linear term
pub const COLLAPSE: u32 = 0x7FFF_FFFF;

/// Left rotation applied to `b ^ u`
pub const ROTATE_LEFT: u32 = 5;

/// Right rotation applied to `b + u`
pub const ROTATE_RIGHT: u32 = 3;

/// Rotation inside the non-linear term
pub const NONLINEAR_ROTATE: u32 = 7;

/// Shift applied to the scaled term
pub const SCALE_SHIFT: u32 = 3;

/// `mix_byte` applications per `round_mix`
pub const ROUNDS_PER_BYTE: usize = 3;

/// Algorithm version
pub const VERSION: u8 = 1;
