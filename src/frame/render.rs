use glam::Vec3;

use crate::camera::Camera;
use crate::scene::SceneGraph;

/// Whatever presents the scene once per tick.
pub trait RenderTarget {
    /// Present `scene` from `camera`, with `readout` as the status line.
    fn render(&mut self, scene: &SceneGraph, camera: &Camera, readout: &str);
}

/// Renders nothing; remembers what the last frame would have shown.
#[derive(Debug, Clone, Default)]
pub struct HeadlessTarget {
    frames: u64,
    last_eye: Option<Vec3>,
    last_readout: String,
    last_node_count: usize,
}

impl HeadlessTarget {
    /// Number of render calls so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Camera position of the last rendered frame.
    #[must_use]
    pub fn last_eye(&self) -> Option<Vec3> {
        self.last_eye
    }

    /// Nodes reachable from the root in the last rendered frame.
    #[must_use]
    pub fn last_node_count(&self) -> usize {
        self.last_node_count
    }

    /// Status line of the last rendered frame.
    #[must_use]
    pub fn last_readout(&self) -> &str {
        &self.last_readout
    }
}

impl RenderTarget for HeadlessTarget {
    fn render(&mut self, scene: &SceneGraph, camera: &Camera, readout: &str) {
        self.frames += 1;
        self.last_eye = Some(camera.eye);
        readout.clone_into(&mut self.last_readout);
        self.last_node_count = scene.walk().len();
        log::trace!(
            "frame {}: {} nodes, {readout}",
            self.frames,
            self.last_node_count
        );
    }
}
