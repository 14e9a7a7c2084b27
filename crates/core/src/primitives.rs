//! Mixing primitives for KeyMix
//!
//! Every function here works on `u32` with wrapping arithmetic. The input
//! byte `u` is always widened to `u32` before use.

use crate::params::*;

/// 32-bit circular left rotation, amount reduced modulo 32
#[inline(always)]
pub fn rotl(x: u32, amount: u32) -> u32 {
    x.rotate_left(amount % u32::BITS)
}

/// 32-bit circular right rotation, amount reduced modulo 32
#[inline(always)]
pub fn rotr(x: u32, amount: u32) -> u32 {
    x.rotate_right(amount % u32::BITS)
}

/// Non-linear term combining the two linear halves of `mix_byte`
///
/// `zeta = (alpha ^ beta) + (alpha & beta)` never carries, since the two
/// operands share no set bits.
#[inline(always)]
pub fn nonlinear(alpha: u32, beta: u32, u: u32) -> u32 {
    let zeta = (alpha ^ beta).wrapping_add(alpha & beta);

    let mut z = SCALE.wrapping_mul(zeta) << SCALE_SHIFT;
    z = z.wrapping_add(u.wrapping_mul(GROW));
    z = rotl(z ^ FLIP, NONLINEAR_ROTATE);
    z & COLLAPSE
}

/// Single byte-level mixing step
#[inline(always)]
pub fn mix_byte(b: u32, u: u32) -> u32 {
    let alpha = rotl(b ^ u, ROTATE_LEFT);
    let beta = rotr(b.wrapping_add(u), ROTATE_RIGHT);
    let gamma = nonlinear(alpha, beta, u);

    alpha.wrapping_add(beta).wrapping_add(gamma)
}

/// Round amplifier: `mix_byte` applied [`ROUNDS_PER_BYTE`] times
#[inline(always)]
pub fn round_mix(b: u32, u: u32) -> u32 {
    (0..ROUNDS_PER_BYTE).fold(b, |acc, _| mix_byte(acc, u))
}

/// Fold all state words into a single scalar
///
/// `acc = words[0]`, then `acc = round_mix(acc + w, u)` for every later word.
#[inline(always)]
pub fn entangle(u: u32, words: &[u32; STATE_WORDS]) -> u32 {
    words[1..]
        .iter()
        .fold(words[0], |acc, &w| round_mix(acc.wrapping_add(w), u))
}
