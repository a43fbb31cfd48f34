//! Time abstraction traits for platform-agnostic timing operations.
//!
//! The `TimeSource` trait abstracts over different time providers (RTOS
//! tick, mock) so the failsafe classifier and the entropy timeout can be
//! tested on host with controllable time.

use alloc::rc::Rc;
use core::cell::Cell;

/// Platform-agnostic time source for timers and timeouts.
///
/// # Example
///
/// ```
/// use peregrine_core::traits::{MockTime, TimeSource};
///
/// fn expired<T: TimeSource>(time: &T, deadline_us: u64) -> bool {
///     time.now_us() >= deadline_us
/// }
///
/// let time = MockTime::new();
/// time.advance(2_000);
/// assert!(expired(&time, 1_000));
/// ```
pub trait TimeSource: Clone {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64;

    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction to handle potential overflow.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

/// Mock time source with a shared, controllable clock.
///
/// Clones share the same underlying clock, so a mock peripheral handed a
/// clone can advance time seen by the code under test (e.g. to simulate a
/// hardware wait inside a polling loop).
///
/// Host-test use only; embedded targets provide an RTOS-backed TimeSource.
///
/// # Example
///
/// ```
/// use peregrine_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let shared = time.clone();
///
/// shared.advance(1_000);
/// assert_eq!(time.now_us(), 1_000);
/// assert_eq!(time.now_ms(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Rc<Cell<u64>>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        let time = Self::new();
        time.set(us);
        time
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_us.get() / 1000
    }

    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_time_initial_value() {
        let time = MockTime::new();
        assert_eq!(time.now_us(), 0);
        assert_eq!(time.now_ms(), 0);
    }

    #[test]
    fn mock_time_with_initial() {
        let time = MockTime::with_initial(5_000_000);
        assert_eq!(time.now_us(), 5_000_000);
        assert_eq!(time.now_ms(), 5000);
    }

    #[test]
    fn mock_time_advance() {
        let time = MockTime::new();
        time.advance(500_000);
        time.advance(500_000);
        assert_eq!(time.now_us(), 1_000_000);
        assert_eq!(time.now_ms(), 1000);
    }

    #[test]
    fn mock_time_clones_share_clock() {
        let time = MockTime::new();
        let other = time.clone();
        other.advance(42_000);
        assert_eq!(time.now_us(), 42_000);
    }

    #[test]
    fn mock_time_elapsed_since_saturates() {
        let time = MockTime::new();
        time.set(1_000);
        // Reference in the "future" saturates to 0
        assert_eq!(time.elapsed_since(5_000), 0);
        assert_eq!(time.elapsed_since(400), 600);
    }
}
