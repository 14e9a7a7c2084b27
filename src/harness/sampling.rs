//! Deterministic work splitting for the sampling measurements
//!
//! Trials are cut into fixed-size chunks. Chunk `c` of a measurement always
//! draws from the same ChaCha8 stream, so the aggregated result depends only
//! on the seed, whether chunks run on one thread or on the rayon pool.

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Trials per chunk
pub(crate) const CHUNK_SIZE: u64 = 4096;

/// Separates the random streams of the different measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    Avalanche = 1,
    Collision = 2,
    Preimage = 3,
}

/// Pseudorandom generator for one chunk of one measurement
pub(crate) fn chunk_rng(seed: u64, stream: Stream, chunk: u64) -> ChaCha8Rng {
    let mut seed_bytes = [0u8; 32];
    seed_bytes[..8].copy_from_slice(&seed.to_le_bytes());
    seed_bytes[8] = stream as u8;

    let mut rng = ChaCha8Rng::from_seed(seed_bytes);
    rng.set_stream(chunk);
    rng
}

/// Number of trials in chunk `chunk` out of `total`
#[inline(always)]
fn chunk_len(total: u64, chunk: u64) -> u64 {
    (total - chunk * CHUNK_SIZE).min(CHUNK_SIZE)
}

/// Run `work(chunk, len)` for every chunk of `total` trials, in chunk order
#[cfg(feature = "parallel")]
pub(crate) fn map_chunks<T, F>(total: u64, work: F) -> Vec<T>
where
    T: Send,
    F: Fn(u64, u64) -> T + Sync + Send,
{
    let chunks = total.div_ceil(CHUNK_SIZE);
    (0..chunks)
        .into_par_iter()
        .map(|chunk| work(chunk, chunk_len(total, chunk)))
        .collect()
}

/// Run `work(chunk, len)` for every chunk of `total` trials, in chunk order
#[cfg(not(feature = "parallel"))]
pub(crate) fn map_chunks<T, F>(total: u64, work: F) -> Vec<T>
where
    T: Send,
    F: Fn(u64, u64) -> T + Sync + Send,
{
    let chunks = total.div_ceil(CHUNK_SIZE);
    (0..chunks)
        .map(|chunk| work(chunk, chunk_len(total, chunk)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_core::RngCore;

    #[test]
    fn test_chunks_cover_total() {
        let lens = map_chunks(CHUNK_SIZE * 2 + 5, |_, len| len);
        assert_eq!(lens, vec![CHUNK_SIZE, CHUNK_SIZE, 5]);
        assert!(map_chunks(0, |_, len| len).is_empty());
    }

    #[test]
    fn test_chunks_keep_order() {
        let ids = map_chunks(CHUNK_SIZE * 8, |chunk, _| chunk);
        assert_eq!(ids, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_streams_are_independent() {
        let mut a = chunk_rng(7, Stream::Avalanche, 0);
        let mut b = chunk_rng(7, Stream::Avalanche, 1);
        let mut c = chunk_rng(7, Stream::Collision, 0);
        let mut again = chunk_rng(7, Stream::Avalanche, 0);

        let first = a.next_u64();
        assert_ne!(first, b.next_u64());
        assert_ne!(first, c.next_u64());
        assert_eq!(first, again.next_u64());
    }
}
