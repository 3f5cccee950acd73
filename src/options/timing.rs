use serde::{Deserialize, Serialize};

/// Frame pacing for hosts that schedule ticks themselves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingOptions {
    /// Target frames per second (0 = unlimited).
    pub target_fps: u32,
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self { target_fps: 60 }
    }
}
