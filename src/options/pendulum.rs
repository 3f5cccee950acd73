use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// How far each integrator step advances the swing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// One unit step per tick, regardless of how long the tick took.
    /// Swing speed follows the display refresh rate.
    #[default]
    PerFrame,
    /// Scale each step by `dt * reference_hz`, so a display running at
    /// `reference_hz` sees the same motion as `PerFrame`.
    Scaled {
        /// Refresh rate at which a scaled step equals a unit step.
        reference_hz: f32,
    },
}

/// Constants for the suspended-load pendulum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PendulumOptions {
    /// Gravitational constant in scene units per tick².
    pub gravity: f32,
    /// Pendulum arm length in scene units.
    pub length: f32,
    /// Maximum swing angle in radians (hard clamp).
    pub amplitude: f32,
    /// Per-step velocity multiplier used when `apply_damping` is set.
    pub damping_factor: f32,
    /// Multiply angular velocity by `damping_factor` every step.
    pub apply_damping: bool,
    /// Step scaling policy.
    pub step: StepMode,
}

impl Default for PendulumOptions {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            length: 2000.0,
            amplitude: PI / 50.0,
            damping_factor: 0.995,
            apply_damping: false,
            step: StepMode::PerFrame,
        }
    }
}

impl PendulumOptions {
    /// Reject values that would break the amplitude clamp or blow up the
    /// integrator.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(format!(
                "pendulum.amplitude must be finite and >= 0, got {}",
                self.amplitude
            ));
        }
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(format!(
                "pendulum.length must be finite and > 0, got {}",
                self.length
            ));
        }
        if !self.gravity.is_finite() {
            return Err(format!("pendulum.gravity must be finite, got {}", self.gravity));
        }
        if !self.damping_factor.is_finite() || self.damping_factor < 0.0 {
            return Err(format!(
                "pendulum.damping_factor must be finite and >= 0, got {}",
                self.damping_factor
            ));
        }
        if let StepMode::Scaled { reference_hz } = self.step {
            if !reference_hz.is_finite() || reference_hz <= 0.0 {
                return Err(format!(
                    "pendulum.step.scaled.reference_hz must be finite and > 0, got {reference_hz}"
                ));
            }
        }
        Ok(())
    }
}
