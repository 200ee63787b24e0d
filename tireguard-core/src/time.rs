//! Time and tick bookkeeping
//!
//! The core never reads a clock. Timestamps arrive with the readings and
//! are carried through to alerts untouched; ordering comes from the tick
//! index, not the timestamp. Reading sources use a [`TimeSource`] to stamp
//! what they produce.

/// Timestamp in milliseconds since epoch (or since boot for monotonic sources)
pub type Timestamp = u64;

/// Monotonic tick counter, one per data-collection cycle
pub type TickIndex = u64;

/// Default interval between data-collection cycles (ms)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 30_000;

/// Source of time for reading producers
pub trait TimeSource {
    /// Current timestamp in milliseconds
    fn now(&self) -> Timestamp;

    /// Whether this source provides wall clock time (vs monotonic)
    fn is_wall_clock(&self) -> bool;
}

/// Simulated clock that moves forward one fixed interval per tick
///
/// Deterministic, so runs driven by it are reproducible.
#[derive(Debug, Clone)]
pub struct TickClock {
    start: Timestamp,
    interval_ms: u64,
    tick: TickIndex,
}

impl TickClock {
    /// Clock starting at `start`, advancing `interval_ms` per tick
    pub fn new(start: Timestamp, interval_ms: u64) -> Self {
        Self {
            start,
            interval_ms,
            tick: 0,
        }
    }

    /// Move to the next tick and return its index (first call yields 1)
    pub fn advance(&mut self) -> TickIndex {
        self.tick += 1;
        self.tick
    }

    /// Index of the current tick (0 before the first advance)
    pub fn tick(&self) -> TickIndex {
        self.tick
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(0, DEFAULT_TICK_INTERVAL_MS)
    }
}

impl TimeSource for TickClock {
    fn now(&self) -> Timestamp {
        self.start
            .saturating_add(self.tick.saturating_mul(self.interval_ms))
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_clock_advances_by_interval() {
        let mut clock = TickClock::new(1_000, 500);
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.now(), 1_000);

        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.now(), 1_500);

        clock.advance();
        assert_eq!(clock.now(), 2_000);
        assert!(!clock.is_wall_clock());
    }
}
