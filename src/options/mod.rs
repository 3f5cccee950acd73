//! Centralized scene and simulation options with TOML support.
//!
//! Every tunable constant (pendulum, orbit mode, camera, stage layout, asset
//! paths, keybindings, frame pacing) lives here. Options serialize to/from
//! TOML so a scene can be re-tuned without rebuilding.

mod assets;
mod camera;
mod keybindings;
mod orbit;
mod pendulum;
mod stage;
mod timing;

use std::path::Path;

pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use keybindings::{KeyAction, KeybindingOptions};
pub use orbit::OrbitOptions;
pub use pendulum::{PendulumOptions, StepMode};
use serde::{Deserialize, Serialize};
pub use stage::StageOptions;
pub use timing::TimingOptions;

use crate::error::CraneError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[pendulum]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Pendulum constants and integration policy.
    pub pendulum: PendulumOptions,
    /// Orbit-mode circle parameters.
    pub orbit: OrbitOptions,
    /// Camera placement, projection and control parameters.
    pub camera: CameraOptions,
    /// Fixed scene layout.
    pub stage: StageOptions,
    /// Model asset locations.
    pub assets: AssetOptions,
    /// Keyboard binding options.
    pub keybindings: KeybindingOptions,
    /// Frame pacing.
    pub timing: TimingOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// fails [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self, CraneError> {
        let content = std::fs::read_to_string(path).map_err(CraneError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CraneError::OptionsParse`] if the TOML is malformed or the
    /// values fail [`validate`](Self::validate).
    pub fn from_toml(content: &str) -> Result<Self, CraneError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| CraneError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check values that parse fine but would panic or diverge at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`CraneError::OptionsParse`] naming the first bad field.
    pub fn validate(&self) -> Result<(), CraneError> {
        self.pendulum
            .validate()
            .and_then(|()| self.camera.validate())
            .map_err(CraneError::OptionsParse)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), CraneError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CraneError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CraneError::Io)?;
        }
        std::fs::write(path, content).map_err(CraneError::Io)
    }
}
