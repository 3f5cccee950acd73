//! Time-driven turntable camera ("orbit mode").
//!
//! While enabled, the eye sits on a horizontal circle around the world Y
//! axis at a fixed height, with its phase taken directly from wall-clock
//! time. No phase is stored: switching the mode on makes the camera jump
//! straight onto the circle. Switching it off puts the camera back at its
//! resting position, once.

use std::f64::consts::TAU;

use glam::Vec3;

use super::core::Camera;
use crate::options::{CameraOptions, OrbitOptions};

/// Whether orbit mode is active. The only state the mode keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrbitState {
    /// Orbit mode on/off.
    pub enabled: bool,
}

/// Result of [`OrbitCameraDriver::set_enabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitTransition {
    /// Requested state equals the current one; nothing happened.
    Unchanged,
    /// Orbit mode switched on.
    Enabled,
    /// Orbit mode switched off and the camera was reset.
    Disabled,
}

/// Eye position on the orbit circle at time `t` seconds.
///
/// The phase is reduced in `f64` so large epoch timestamps keep their
/// sub-second resolution.
#[must_use]
pub fn orbit_position(t: f64, radius: f32, angular_speed: f32, height: f32) -> Vec3 {
    let phase = (t * f64::from(angular_speed)).rem_euclid(TAU);
    let radius = f64::from(radius);
    Vec3::new(
        (radius * phase.cos()) as f32,
        height,
        (radius * phase.sin()) as f32,
    )
}

/// Computes orbit positions and applies mode transitions to a [`Camera`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCameraDriver {
    radius: f32,
    angular_speed: f32,
    height: f32,
    look_target: Vec3,
    rest_position: Vec3,
}

impl OrbitCameraDriver {
    /// Driver from orbit and camera options.
    #[must_use]
    pub fn new(orbit: &OrbitOptions, camera: &CameraOptions) -> Self {
        Self {
            radius: orbit.radius,
            angular_speed: orbit.angular_speed,
            height: orbit.height,
            look_target: Vec3::from_array(camera.look_target),
            rest_position: Vec3::from_array(camera.initial_position),
        }
    }

    /// Eye position at wall-clock time `t` seconds.
    #[must_use]
    pub fn compute_position(&self, t: f64) -> Vec3 {
        orbit_position(t, self.radius, self.angular_speed, self.height)
    }

    /// Fixed point the camera is aimed at.
    #[must_use]
    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    /// Put the camera at its resting position, aimed at the look target.
    pub fn reset(&self, camera: &mut Camera) {
        camera.eye = self.rest_position;
        camera.look_at(self.look_target);
    }

    /// Switch orbit mode. Disabling resets the camera exactly once; enabling
    /// leaves it alone until the next [`update`](Self::update).
    pub fn set_enabled(
        &self,
        state: &mut OrbitState,
        enabled: bool,
        camera: &mut Camera,
    ) -> OrbitTransition {
        if state.enabled == enabled {
            return OrbitTransition::Unchanged;
        }
        state.enabled = enabled;
        if enabled {
            log::debug!("orbit mode on");
            OrbitTransition::Enabled
        } else {
            self.reset(camera);
            log::debug!("orbit mode off, camera reset to {}", self.rest_position);
            OrbitTransition::Disabled
        }
    }

    /// Move the camera onto the circle if orbit mode is on. Returns whether
    /// the camera was written.
    pub fn update(&self, state: OrbitState, t: f64, camera: &mut Camera) -> bool {
        if !state.enabled {
            return false;
        }
        camera.eye = self.compute_position(t);
        camera.look_at(self.look_target);
        true
    }
}
