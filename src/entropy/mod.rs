//! Entropy Source
//!
//! Two tiers. [`Entropy::random`] is a fast xorshift128+ PRNG for jitter,
//! backoff and identifiers; it never blocks and cannot fail once seeded.
//! [`true_random`] polls the hardware TRNG under a caller-chosen deadline
//! for the rare consumer that needs real entropy (key material); on timeout
//! it returns false and the buffer contents must not be consumed.

use crate::platform::{HardwareCaps, TrngInterface};
use crate::traits::TimeSource;

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seeded xorshift128+ pseudo-random generator
pub struct Entropy {
    s0: u64,
    s1: u64,
}

impl Entropy {
    /// Create a generator from a seed, e.g. a boot-time TRNG read or the
    /// microsecond clock on targets without one
    pub fn new(seed: u64) -> Self {
        // splitmix64 expansion guarantees a nonzero xorshift state even
        // for seed 0
        let mut sm = seed;
        Self {
            s0: splitmix64(&mut sm),
            s1: splitmix64(&mut sm),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.s0;
        let y = self.s1;
        self.s0 = y;
        x ^= x << 23;
        self.s1 = x ^ y ^ (x >> 17) ^ (y >> 26);
        self.s1.wrapping_add(y)
    }

    /// Fill `buf` with pseudo-random bytes
    ///
    /// Always succeeds; the bool mirrors [`true_random`] so callers can
    /// treat the two tiers uniformly.
    pub fn random(&mut self, buf: &mut [u8]) -> bool {
        for chunk in buf.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
        true
    }
}

/// Fill `buf` from the hardware TRNG, polling until done or `timeout_us`
/// elapses
///
/// Returns false on timeout or on targets without a TRNG; the buffer may
/// then be partially written and must not be consumed.
pub fn true_random<T, C>(
    trng: &mut T,
    time: &C,
    caps: &HardwareCaps,
    buf: &mut [u8],
    timeout_us: u64,
) -> bool
where
    T: TrngInterface,
    C: TimeSource,
{
    if !caps.true_rng {
        return false;
    }

    let start = time.now_us();
    let mut filled = 0;
    loop {
        filled += trng.fill(&mut buf[filled..]);
        if filled == buf.len() {
            return true;
        }
        if time.elapsed_since(start) >= timeout_us {
            crate::log_warn!("TRNG timeout after {} of {} bytes", filled, buf.len());
            return false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockTrng;
    use crate::traits::MockTime;

    #[test]
    fn test_prng_deterministic_per_seed() {
        let mut a = Entropy::new(42);
        let mut b = Entropy::new(42);
        let mut c = Entropy::new(43);

        let (mut ba, mut bb, mut bc) = ([0u8; 32], [0u8; 32], [0u8; 32]);
        assert!(a.random(&mut ba));
        assert!(b.random(&mut bb));
        assert!(c.random(&mut bc));

        assert_eq!(ba, bb);
        assert_ne!(ba, bc);
    }

    #[test]
    fn test_prng_fills_odd_lengths() {
        let mut rng = Entropy::new(7);
        let mut buf = [0u8; 13];
        assert!(rng.random(&mut buf));
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_zero_seed_still_produces_output() {
        let mut rng = Entropy::new(0);
        let mut buf = [0u8; 16];
        rng.random(&mut buf);
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_true_random_exact_fill_over_multiple_polls() {
        let time = MockTime::new();
        let mut trng = MockTrng::new(16, 4).with_clock(time.clone(), 100);
        let mut buf = [0u8; 16];

        assert!(true_random(&mut trng, &time, &HardwareCaps::full(), &mut buf, 10_000));
        assert!(buf.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_true_random_times_out_on_starved_trng() {
        let time = MockTime::new();
        // Budget covers only half the request; each empty poll burns 100 us
        let mut trng = MockTrng::new(8, 4).with_clock(time.clone(), 100);
        let mut buf = [0u8; 16];

        assert!(!true_random(&mut trng, &time, &HardwareCaps::full(), &mut buf, 1_000));
        assert!(time.now_us() >= 1_000);
    }

    #[test]
    fn test_true_random_unsupported_platform() {
        let time = MockTime::new();
        let mut trng = MockTrng::unlimited();
        let mut buf = [0u8; 8];

        assert!(!true_random(&mut trng, &time, &HardwareCaps::none(), &mut buf, 1_000));
    }
}
