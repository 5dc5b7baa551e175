//! Self-re-arming tick timing with explicit elapsed measurement.

use std::time::{Duration, Instant};

/// Measures wall-clock time between ticks and schedules the next one.
///
/// Models a one-shot timer that re-arms after each tick completes: the next
/// deadline is `completed_at + interval`, so actual tick spacing is the
/// configured interval plus the previous tick's compute time. The state
/// machine consumes the measured delta, never an assumed fixed period.
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval: Duration,
    last_fire: Option<Instant>,
}

impl TickTimer {
    /// Creates a timer with the given interval, not yet armed.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
        }
    }

    /// The configured interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Replaces the interval; applies from the next re-arm.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Arms the timer at `now`, so the first fire measures from here.
    pub fn arm(&mut self, now: Instant) {
        self.last_fire = Some(now);
    }

    /// Records a tick at `now` and returns the elapsed wall-clock time since
    /// the previous fire (zero if never armed).
    pub fn fire(&mut self, now: Instant) -> Duration {
        let elapsed = self
            .last_fire
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_fire = Some(now);
        elapsed
    }

    /// Deadline of the next tick, given when the current one completed.
    #[must_use]
    pub fn rearm(&self, completed_at: Instant) -> Instant {
        completed_at + self.interval
    }
}
