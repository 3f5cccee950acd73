use serde::{Deserialize, Serialize};

/// Layout of the fixed scene: anchor placement, lights, grid and skybox.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StageOptions {
    /// World position of the pendulum pivot once both models are loaded.
    pub anchor_position: [f32; 3],
    /// Bricks offset relative to the anchor.
    pub bricks_offset: [f32; 3],
    /// Hemisphere light intensity.
    pub ambient_intensity: f32,
    /// Directional (sun) light intensity.
    pub sun_intensity: f32,
    /// Directional light position; it shines toward the origin.
    pub sun_position: [f32; 3],
    /// Edge length of the ground grid.
    pub grid_size: f32,
    /// Number of grid divisions along each edge.
    pub grid_divisions: u32,
    /// Skybox face images in +x, -x, +y, -y, +z, -z order.
    pub skybox_faces: [String; 6],
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            anchor_position: [20.0, 35.0, 0.0],
            bricks_offset: [0.0, -15.0, 0.0],
            ambient_intensity: 1.0,
            sun_intensity: 1.5,
            sun_position: [0.0, 200.0, 100.0],
            grid_size: 2000.0,
            grid_divisions: 20,
            skybox_faces: [
                "assets/skybox/px.jpg".into(),
                "assets/skybox/nx.jpg".into(),
                "assets/skybox/py.jpg".into(),
                "assets/skybox/ny.jpg".into(),
                "assets/skybox/pz.jpg".into(),
                "assets/skybox/nz.jpg".into(),
            ],
        }
    }
}
