//! Clock abstraction for testable bootstrap timestamps

use std::cell::Cell;

/// Source of wall-clock milliseconds for the `gtm.start` field
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Production clock
///
/// Uses chrono, which reads `Date.now()` when compiled for the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Deterministic clock for tests and snapshot rendering
#[derive(Debug, Default, Clone)]
pub struct FixedClock {
    current: Cell<i64>,
}

impl FixedClock {
    pub fn new(millis: i64) -> Self {
        Self {
            current: Cell::new(millis),
        }
    }

    /// Move the clock forward by `millis`
    pub fn advance(&self, millis: i64) {
        self.current.set(self.current.get() + millis);
    }

    pub fn set(&self, millis: i64) {
        self.current.set(millis);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.current.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn test_fixed_clock_advance_and_set() {
        let clock = FixedClock::new(1_000);
        assert_eq!(clock.now_millis(), 1_000);

        clock.advance(250);
        assert_eq!(clock.now_millis(), 1_250);

        clock.set(42);
        assert_eq!(clock.now_millis(), 42);
    }
}
