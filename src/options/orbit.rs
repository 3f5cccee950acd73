use serde::{Deserialize, Serialize};

/// Auto-rotating camera ("orbit mode") parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitOptions {
    /// Horizontal circle radius around the world Y axis.
    pub radius: f32,
    /// Angular speed in radians per second of wall-clock time.
    pub angular_speed: f32,
    /// Fixed camera height while orbiting.
    pub height: f32,
    /// Start with orbit mode already enabled.
    pub enabled_at_start: bool,
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            radius: 100.0,
            angular_speed: 0.25,
            height: 50.0,
            enabled_at_start: false,
        }
    }
}
