//! Drop clock - timestamp-driven automatic descent
//!
//! The host calls [`DropClock::tick`] at render cadence with a monotonic
//! timestamp. Descent fires when strictly more than the current interval has
//! elapsed since the last descent, so the fall rate does not depend on how
//! often ticks arrive. Clearing the clock (restart, pause) makes the next tick
//! re-arm it without firing, so no backlog of drops is ever replayed.

/// Emitted when automatic descent is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
    pub at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropClock {
    last_drop_ms: Option<u64>,
}

impl DropClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now_ms: u64, interval_ms: u32) -> Option<DropEvent> {
        let Some(last) = self.last_drop_ms else {
            self.last_drop_ms = Some(now_ms);
            return None;
        };

        let elapsed = now_ms.saturating_sub(last);
        if elapsed > u64::from(interval_ms) {
            self.last_drop_ms = Some(now_ms);
            return Some(DropEvent { at_ms: now_ms });
        }
        None
    }

    /// Forget the last drop time; the next tick only re-arms
    pub fn reset(&mut self) {
        self.last_drop_ms = None;
    }

    pub fn last_drop_ms(&self) -> Option<u64> {
        self.last_drop_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_arms_without_firing() {
        let mut clock = DropClock::new();
        assert_eq!(clock.tick(5_000, 1000), None);
        assert_eq!(clock.last_drop_ms(), Some(5_000));
    }

    #[test]
    fn test_fires_only_after_strictly_more_than_interval() {
        let mut clock = DropClock::new();
        clock.tick(0, 1000);
        assert_eq!(clock.tick(1000, 1000), None);
        assert_eq!(clock.tick(1001, 1000), Some(DropEvent { at_ms: 1001 }));
        assert_eq!(clock.last_drop_ms(), Some(1001));
    }

    #[test]
    fn test_dense_ticks_fire_once_per_interval() {
        let mut clock = DropClock::new();
        let mut fired = 0;
        let mut now = 0;
        while now <= 3_500 {
            if clock.tick(now, 1000).is_some() {
                fired += 1;
            }
            now += 16;
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_long_gap_fires_once() {
        let mut clock = DropClock::new();
        clock.tick(0, 100);
        assert!(clock.tick(10_000, 100).is_some());
        assert_eq!(clock.tick(10_050, 100), None);
    }

    #[test]
    fn test_reset_suppresses_backlog() {
        let mut clock = DropClock::new();
        clock.tick(0, 500);
        clock.reset();
        assert_eq!(clock.tick(60_000, 500), None);
        assert_eq!(clock.tick(60_400, 500), None);
        assert!(clock.tick(60_501, 500).is_some());
    }
}
