//! Deadline-based frame pacing for hosts that run their own tick loop.
//!
//! Each finished frame schedules the next one a fixed interval after the
//! previous deadline, so pacing does not drift with tick duration. A host
//! that falls more than one interval behind starts a fresh schedule instead
//! of bursting to catch up.

use web_time::{Duration, Instant};

/// Weight of the newest frame in the smoothed rate.
const FPS_SMOOTHING: f32 = 0.05;

/// Frame deadline tracking plus a smoothed achieved frame rate.
pub struct FrameTiming {
    /// Time between frames; zero means unpaced.
    interval: Duration,
    /// When the next frame may start.
    next_due: Instant,
    /// End of the previous frame, for the rate estimate.
    last_frame: Option<Instant>,
    smoothed_fps: f32,
}

impl FrameTiming {
    /// Pacing for `target_fps` frames per second (0 = unpaced).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let interval = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };
        Self {
            interval,
            next_due: Instant::now(),
            last_frame: None,
            smoothed_fps: if target_fps > 0 { target_fps as f32 } else { 0.0 },
        }
    }

    /// Whether the next frame's deadline has passed.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.interval.is_zero() || Instant::now() >= self.next_due
    }

    /// How long until the next frame is due.
    #[must_use]
    pub fn time_until_next(&self) -> Duration {
        self.next_due.saturating_duration_since(Instant::now())
    }

    /// Record a finished frame and schedule the next deadline.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        self.next_due += self.interval;
        if now.saturating_duration_since(self.next_due) > self.interval {
            self.next_due = now + self.interval;
        }

        if let Some(last) = self.last_frame.replace(now) {
            let frame_time = now.duration_since(last).as_secs_f32();
            if frame_time > 0.0 {
                self.smoothed_fps = self.smoothed_fps * (1.0 - FPS_SMOOTHING)
                    + FPS_SMOOTHING / frame_time;
            }
        }
    }

    /// Smoothed achieved frame rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
