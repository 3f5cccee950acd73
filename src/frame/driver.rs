use crate::error::CraneError;
use crate::util::FrameTiming;

/// What a step wants the driver to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    /// Schedule another tick.
    Continue,
    /// Stop driving.
    Stop,
}

/// Calls a step function at the host's frame cadence.
pub trait TickDriver {
    /// Run `step` once per frame until it returns [`TickControl::Stop`],
    /// fails, or the driver decides to stop. The step receives the frame
    /// index. Returns the number of frames run.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `step`.
    fn drive(
        &mut self,
        step: &mut dyn FnMut(u64) -> Result<TickControl, CraneError>,
    ) -> Result<u64, CraneError>;
}

/// Ticks at a fixed target rate on the calling thread, optionally for a
/// bounded number of frames.
pub struct FixedRateDriver {
    timing: FrameTiming,
    max_frames: Option<u64>,
}

impl FixedRateDriver {
    /// Driver at `target_fps` (0 = as fast as possible).
    #[must_use]
    pub fn new(target_fps: u32, max_frames: Option<u64>) -> Self {
        Self {
            timing: FrameTiming::new(target_fps),
            max_frames,
        }
    }

    /// Smoothed achieved frame rate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }
}

impl TickDriver for FixedRateDriver {
    fn drive(
        &mut self,
        step: &mut dyn FnMut(u64) -> Result<TickControl, CraneError>,
    ) -> Result<u64, CraneError> {
        let mut frame = 0;
        while self.max_frames.is_none_or(|max| frame < max) {
            if !self.timing.should_render() {
                std::thread::sleep(self.timing.time_until_next());
                continue;
            }
            let control = step(frame)?;
            self.timing.end_frame();
            frame += 1;
            if control == TickControl::Stop {
                break;
            }
        }
        log::debug!("tick driver stopped after {frame} frames");
        Ok(frame)
    }
}
