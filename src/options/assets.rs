use serde::{Deserialize, Serialize};

/// Model asset locations and import scaling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetOptions {
    /// Path to the crane model.
    pub crane_path: String,
    /// Path to the suspended bricks model.
    pub bricks_path: String,
    /// Uniform scale applied to the crane node on import.
    pub crane_scale: f32,
    /// Uniform scale applied to the bricks node on import.
    pub bricks_scale: f32,
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            crane_path: "assets/models/crane.fbx".into(),
            bricks_path: "assets/models/bricks.fbx".into(),
            crane_scale: 0.1,
            bricks_scale: 0.1,
        }
    }
}
