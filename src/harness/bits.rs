//! Bit-level helpers shared by the harness measurements
//!
//! Bit positions are MSB-first: bit 0 is the most significant bit of byte 0,
//! bit 7 its least significant bit, bit 8 the most significant bit of byte 1.

use keymix_core::Digest;

use super::HarnessError;

/// Toggle one bit of `buf` in place
///
/// `bit` is reduced modulo `buf.len() * 8`; an empty buffer is left alone.
#[inline(always)]
pub(crate) fn flip_bit_in_place(buf: &mut [u8], bit: usize) {
    let total = buf.len() * 8;
    if total == 0 {
        return;
    }
    let bit = bit % total;
    buf[bit / 8] ^= 0x80 >> (bit % 8);
}

/// Return a copy of `input` with exactly one bit toggled
///
/// # Example
///
/// ```rust
/// use keymix::harness::flip_bit;
///
/// assert_eq!(flip_bit(&[0x00, 0x00], 0), vec![0x80, 0x00]);
/// assert_eq!(flip_bit(&[0x00, 0x00], 15), vec![0x00, 0x01]);
/// ```
pub fn flip_bit(input: &[u8], bit: usize) -> Vec<u8> {
    let mut out = input.to_vec();
    flip_bit_in_place(&mut out, bit);
    out
}

/// Count differing bits between two equal-length byte sequences
pub fn hamming_distance(a: &[u8], b: &[u8]) -> Result<u32, HarnessError> {
    if a.len() != b.len() {
        return Err(HarnessError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum())
}

/// Count differing bits, zero-extending the shorter sequence
pub fn bit_difference(a: &[u8], b: &[u8]) -> u32 {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            (x ^ y).count_ones()
        })
        .sum()
}

/// Hamming distance between two digests; lengths always agree
#[inline(always)]
pub(crate) fn digest_distance(a: &Digest, b: &Digest) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}
