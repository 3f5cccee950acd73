use std::cell::Cell;

use web_time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time in seconds.
pub trait Clock {
    /// Seconds since an arbitrary fixed origin. Must not go backwards
    /// between ticks for delta-time scaling to behave.
    fn now_secs(&self) -> f64;
}

/// Seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64())
    }
}

/// Hand-advanced clock for deterministic runs.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    /// Clock stopped at `start` seconds.
    #[must_use]
    pub fn starting_at(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to `t` seconds.
    pub fn set(&self, t: f64) {
        self.now.set(t);
    }

    /// Move forward by `dt` seconds.
    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> f64 {
        self.now.get()
    }
}
