//! Mock hardware TRNG for testing

use crate::platform::traits::trng::TrngInterface;
use crate::traits::MockTime;

/// Mock TRNG with a bounded entropy budget
///
/// Produces a deterministic byte pattern, at most `per_poll` bytes per
/// `fill` call, until `budget` bytes have been handed out. A shared
/// [`MockTime`] clone can be attached so each poll advances the clock,
/// letting timeout paths run to completion in a single-threaded test.
pub struct MockTrng {
    budget: usize,
    per_poll: usize,
    counter: u8,
    clock: Option<(MockTime, u64)>,
}

impl MockTrng {
    /// TRNG that will produce `budget` bytes total, `per_poll` per call
    pub fn new(budget: usize, per_poll: usize) -> Self {
        Self {
            budget,
            per_poll,
            counter: 0,
            clock: None,
        }
    }

    /// TRNG with unlimited entropy, filling any request in one call
    pub fn unlimited() -> Self {
        Self::new(usize::MAX, usize::MAX)
    }

    /// Advance the shared clock by `us_per_poll` on every `fill` call,
    /// simulating the hardware wait inside a polling loop.
    pub fn with_clock(mut self, clock: MockTime, us_per_poll: u64) -> Self {
        self.clock = Some((clock, us_per_poll));
        self
    }
}

impl TrngInterface for MockTrng {
    fn fill(&mut self, buf: &mut [u8]) -> usize {
        if let Some((clock, step)) = &self.clock {
            clock.advance(*step);
        }

        let n = buf.len().min(self.per_poll).min(self.budget);
        for byte in &mut buf[..n] {
            self.counter = self.counter.wrapping_mul(31).wrapping_add(17);
            *byte = self.counter;
        }
        self.budget -= n;
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::TimeSource;

    #[test]
    fn test_budget_exhausts() {
        let mut trng = MockTrng::new(6, 4);
        let mut buf = [0u8; 8];

        assert_eq!(trng.fill(&mut buf), 4);
        assert_eq!(trng.fill(&mut buf), 2);
        assert_eq!(trng.fill(&mut buf), 0);
    }

    #[test]
    fn test_clock_advances_per_poll() {
        let time = MockTime::new();
        let mut trng = MockTrng::new(0, 0).with_clock(time.clone(), 250);
        let mut buf = [0u8; 4];

        trng.fill(&mut buf);
        trng.fill(&mut buf);
        assert_eq!(time.now_us(), 500);
    }
}
