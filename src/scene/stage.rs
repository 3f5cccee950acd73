use glam::Vec3;

use super::{Node, NodeId, NodeKind, SceneGraph, Transform};
use crate::error::CraneError;
use crate::options::StageOptions;

/// Name of the pendulum pivot node.
pub const ANCHOR: &str = "anchor";
/// Name of the crane model node.
pub const CRANE: &str = "crane";
/// Name of the suspended bricks model node.
pub const BRICKS: &str = "bricks";
/// Name of the skybox node.
pub const SKYBOX: &str = "skybox";
/// Name of the ground grid node.
pub const GRID: &str = "grid";
/// Name of the directional light node.
pub const SUN: &str = "sun";
const AMBIENT: &str = "ambient";

/// Ids of the fixed nodes every scene starts with.
#[derive(Debug, Clone, Copy)]
pub struct Stage {
    /// Cube-map background.
    pub skybox: NodeId,
    /// Hemisphere light.
    pub ambient: NodeId,
    /// Directional light.
    pub sun: NodeId,
    /// Ground grid.
    pub grid: NodeId,
    /// Pendulum pivot. Sits at the origin until both models arrive.
    pub anchor: NodeId,
}

impl Stage {
    /// Populate `scene` with the skybox, lights, grid and anchor.
    pub fn build(
        scene: &mut SceneGraph,
        options: &StageOptions,
    ) -> Result<Self, CraneError> {
        let root = scene.root();

        let skybox = scene.insert(
            root,
            Node::new(
                SKYBOX,
                NodeKind::Skybox {
                    faces: options.skybox_faces.clone(),
                },
            ),
        )?;
        let ambient = scene.insert(
            root,
            Node::new(
                AMBIENT,
                NodeKind::HemisphereLight {
                    intensity: options.ambient_intensity,
                },
            ),
        )?;
        let sun = scene.insert(
            root,
            Node::new(
                SUN,
                NodeKind::DirectionalLight {
                    intensity: options.sun_intensity,
                },
            )
            .with_transform(Transform::from_translation(Vec3::from_array(
                options.sun_position,
            ))),
        )?;
        let grid = scene.insert(
            root,
            Node::new(
                GRID,
                NodeKind::Grid {
                    size: options.grid_size,
                    divisions: options.grid_divisions,
                },
            ),
        )?;
        let anchor = scene.insert(root, Node::new(ANCHOR, NodeKind::Anchor))?;

        log::debug!("stage built with {} nodes", scene.len());
        Ok(Self {
            skybox,
            ambient,
            sun,
            grid,
            anchor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_creates_named_fixed_nodes() {
        let mut scene = SceneGraph::new();
        let stage = Stage::build(&mut scene, &StageOptions::default()).unwrap();

        assert_eq!(scene.find(ANCHOR), Some(stage.anchor));
        assert_eq!(scene.find(SKYBOX), Some(stage.skybox));
        assert_eq!(scene.find(GRID), Some(stage.grid));
        assert_eq!(scene.find(SUN), Some(stage.sun));
        assert_eq!(scene.len(), 6);
    }

    #[test]
    fn anchor_starts_at_origin_without_children() {
        let mut scene = SceneGraph::new();
        let stage = Stage::build(&mut scene, &StageOptions::default()).unwrap();

        let anchor = scene.get(stage.anchor).unwrap();
        assert_eq!(anchor.transform, Transform::IDENTITY);
        assert!(anchor.children().is_empty());
        assert_eq!(anchor.kind, NodeKind::Anchor);
    }

    #[test]
    fn building_twice_collides_on_names() {
        let mut scene = SceneGraph::new();
        let _ = Stage::build(&mut scene, &StageOptions::default()).unwrap();
        assert!(Stage::build(&mut scene, &StageOptions::default()).is_err());
    }
}
