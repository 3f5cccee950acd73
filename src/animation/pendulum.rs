//! Single-degree-of-freedom pendulum for the suspended load.
//!
//! Integration is explicit (symplectic) Euler: velocity is updated from the
//! current angle, then the angle from the new velocity. The angle is hard
//! clamped to `[-amplitude, +amplitude]` after every step. Velocity is left
//! untouched by the clamp, so energy is not conserved at the boundary.

use glam::Quat;

use crate::options::{PendulumOptions, StepMode};

/// Angle, angular velocity and angular acceleration of the swing.
///
/// Units are radians, radians/tick and radians/tick², where a tick is one
/// unit step (see [`StepMode`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumState {
    /// Current swing angle.
    pub angle: f32,
    /// Angular velocity.
    pub angular_velocity: f32,
    /// Angular acceleration computed during the last step.
    pub angular_acceleration: f32,
}

impl PendulumState {
    /// Released from rest at full deflection.
    #[must_use]
    pub fn released_at(amplitude: f32) -> Self {
        Self {
            angle: amplitude,
            angular_velocity: 0.0,
            angular_acceleration: 0.0,
        }
    }

    /// Advance by one tick. `dt` (seconds since the previous tick) is only
    /// consulted in [`StepMode::Scaled`].
    #[must_use]
    pub fn step(self, params: &PendulumOptions, dt: f32) -> Self {
        let k = match params.step {
            StepMode::PerFrame => 1.0,
            StepMode::Scaled { reference_hz } => (dt * reference_hz).max(0.0),
        };

        let angular_acceleration =
            -(params.gravity / params.length) * self.angle.sin();
        let mut angular_velocity =
            self.angular_velocity + angular_acceleration * k;
        if params.apply_damping {
            angular_velocity *= params.damping_factor.powf(k);
        }
        let angle = (self.angle + angular_velocity * k)
            .clamp(-params.amplitude, params.amplitude);

        Self {
            angle,
            angular_velocity,
            angular_acceleration,
        }
    }
}

/// Anchor rotation for a swing angle. The swing axis is world Z, so the load
/// moves in the XY plane.
#[must_use]
pub fn swing_rotation(angle: f32) -> Quat {
    Quat::from_rotation_z(angle)
}
