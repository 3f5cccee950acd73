use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Camera placement, projection and orbit-control parameters.
pub struct CameraOptions {
    /// Camera position at startup and after orbit mode is switched off.
    pub initial_position: [f32; 3],
    /// Point the camera is aimed at, both at rest and while orbiting.
    pub look_target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Fraction of pending control motion applied per update (inertia).
    pub damping_factor: f32,
    /// Rotation sensitivity in radians per pixel.
    pub rotate_speed: f32,
    /// Pan sensitivity multiplier.
    pub pan_speed: f32,
    /// Zoom sensitivity multiplier.
    pub zoom_speed: f32,
    /// Closest allowed distance to the look target.
    pub min_distance: f32,
    /// Farthest allowed distance from the look target.
    pub max_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            initial_position: [45.94, 55.71, 58.37],
            look_target: [0.0, 20.0, 0.0],
            fovy: 45.0,
            znear: 0.1,
            zfar: 5000.0,
            damping_factor: 0.05,
            rotate_speed: 0.005,
            pan_speed: 0.1,
            zoom_speed: 0.1,
            min_distance: 5.0,
            max_distance: 1000.0,
        }
    }
}

impl CameraOptions {
    /// Reject control limits the orbit controls cannot clamp to.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let (min, max) = (self.min_distance, self.max_distance);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(format!(
                "camera distance limits must satisfy 0 <= min_distance <= max_distance, \
                 got {min}..{max}"
            ));
        }
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(format!(
                "camera.damping_factor must be within 0..=1, got {}",
                self.damping_factor
            ));
        }
        Ok(())
    }
}
