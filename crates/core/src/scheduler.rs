//! Scheduler module - the recurring tick timer
//!
//! The engine asks a scheduler to fire its tick every N milliseconds and to
//! stop doing so. There is at most one recurring schedule: arming again
//! replaces the previous interval.

/// Host-side timer driving `Engine::tick`.
pub trait Scheduler {
    /// Fire the tick every `interval_ms`, replacing any active schedule.
    fn schedule_interval(&mut self, interval_ms: u32);

    /// Stop firing the tick.
    fn unschedule(&mut self);

    /// The active interval, if any.
    fn interval_ms(&self) -> Option<u32>;
}

/// Fixed-timestep scheduler driven by elapsed milliseconds.
///
/// The host calls [`TickClock::advance`] with frame time and then drains due
/// ticks with [`TickClock::fire`]. Re-arming resets the accumulated time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickClock {
    interval_ms: Option<u32>,
    elapsed_ms: u32,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate frame time. Ignored while unscheduled.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.interval_ms.is_some() {
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        }
    }

    /// Consume one due interval, returning whether a tick should run.
    pub fn fire(&mut self) -> bool {
        match self.interval_ms {
            Some(interval) if self.elapsed_ms >= interval => {
                self.elapsed_ms -= interval;
                true
            }
            _ => false,
        }
    }
}

impl Scheduler for TickClock {
    fn schedule_interval(&mut self, interval_ms: u32) {
        // A zero interval would fire forever within one frame.
        self.interval_ms = Some(interval_ms.max(1));
        self.elapsed_ms = 0;
    }

    fn unschedule(&mut self) {
        self.interval_ms = None;
        self.elapsed_ms = 0;
    }

    fn interval_ms(&self) -> Option<u32> {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscheduled_clock_never_fires() {
        let mut clock = TickClock::new();
        clock.advance(10_000);
        assert!(!clock.fire());
        assert_eq!(clock.interval_ms(), None);
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut clock = TickClock::new();
        clock.schedule_interval(100);

        clock.advance(99);
        assert!(!clock.fire());

        clock.advance(251);
        assert!(clock.fire());
        assert!(clock.fire());
        assert!(clock.fire());
        assert!(!clock.fire());

        // 50ms carried over from the last frame.
        clock.advance(49);
        assert!(!clock.fire());
        clock.advance(1);
        assert!(clock.fire());
    }

    #[test]
    fn test_rescheduling_replaces_and_resets() {
        let mut clock = TickClock::new();
        clock.schedule_interval(1000);
        clock.advance(900);

        clock.schedule_interval(10);
        assert_eq!(clock.interval_ms(), Some(10));
        assert!(!clock.fire());

        clock.advance(10);
        assert!(clock.fire());
    }

    #[test]
    fn test_unschedule_drops_pending_time() {
        let mut clock = TickClock::new();
        clock.schedule_interval(50);
        clock.advance(500);
        clock.unschedule();

        assert_eq!(clock.interval_ms(), None);
        assert!(!clock.fire());
    }
}
