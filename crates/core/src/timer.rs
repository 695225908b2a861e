//! Interval timer driven by elapsed-time deltas.

/// Fires once every `interval_ms` of accumulated time.
///
/// A reset timer reports firing immediately, so a freshly spawned piece takes
/// its first step on the tick after it appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval_ms: u32,
    since_last_fire_ms: u32,
    firing: bool,
}

impl IntervalTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            since_last_fire_ms: 0,
            firing: true,
        }
    }

    /// Accumulate time; fires (and restarts) once the interval is reached.
    pub fn update(&mut self, elapsed_ms: u32) {
        self.since_last_fire_ms = self.since_last_fire_ms.saturating_add(elapsed_ms);
        if self.since_last_fire_ms >= self.interval_ms {
            self.firing = true;
            self.since_last_fire_ms = 0;
        } else {
            self.firing = false;
        }
    }

    /// Change the interval. With `reset_if_changed`, an actual change restarts
    /// the timer (and makes it fire).
    pub fn set_interval(&mut self, interval_ms: u32, reset_if_changed: bool) {
        let interval_ms = interval_ms.max(1);
        if self.interval_ms != interval_ms {
            if reset_if_changed {
                self.reset();
            }
            self.interval_ms = interval_ms;
        }
    }

    pub fn reset(&mut self) {
        self.firing = true;
        self.since_last_fire_ms = 0;
    }

    pub fn is_firing(&self) -> bool {
        self.firing
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}
