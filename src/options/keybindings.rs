use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::Command;

/// Serializable tag for the subset of [`Command`] that can be key-bound
/// (discrete, parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Flip orbit mode on or off.
    ToggleOrbit,
    /// Put the camera back at its initial position.
    ResetCamera,
}

impl KeyAction {
    /// Convert to the corresponding parameterless [`Command`].
    #[must_use]
    pub fn to_command(self) -> Command {
        match self {
            Self::ToggleOrbit => Command::ToggleOrbit,
            Self::ResetCamera => Command::ResetCamera,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyR"`, `"Escape"`, etc.
pub struct KeybindingOptions {
    /// Forward map: key string → action.
    pub bindings: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyR".into(), KeyAction::ToggleOrbit),
            ("KeyQ".into(), KeyAction::ResetCamera),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Command> {
        self.bindings.get(key).map(|action| action.to_command())
    }
}
