//! Monotonic time source for track timing.
//!
//! Tracks never read `Instant` directly; they go through a shared [`Clock`]
//! so the timeline engine can be driven by a manual clock in tests.

use std::sync::Arc;
use std::time::Instant;

/// A monotonic nanosecond counter with an arbitrary fixed origin.
pub trait Clock: Send + Sync {
    fn now_ns(&self) -> u64;
}

pub type SharedClock = Arc<dyn Clock>;

/// Wall-clock independent time backed by `std::time::Instant`.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn shared() -> SharedClock {
        Arc::new(Self::new())
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ns(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
pub(crate) use manual::ManualClock;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now_ns();
        let b = clock.now_ns();
        assert!(b >= a);
    }

    #[test]
    fn manual_clock_moves_only_when_advanced() {
        let clock = ManualClock::new(10);
        assert_eq!(clock.now_ns(), 10);
        clock.advance_ms(2);
        assert_eq!(clock.now_ns(), 2_000_010);
    }
}
