//! Two-slot readiness latch for the crane and bricks models.

use glam::Vec3;

use super::ModelKind;
use crate::error::CraneError;
use crate::options::StageOptions;
use crate::scene::{NodeId, SceneGraph};

/// `Loading -> Ready`, with no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// At least one model has not arrived.
    #[default]
    Loading,
    /// Both models arrived and the anchor has been set up.
    Ready,
}

/// A model that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFailure {
    /// Which model failed.
    pub kind: ModelKind,
    /// Human-readable cause.
    pub message: String,
}

/// Joins the two model loads. Whichever order the loads complete in, the
/// anchor setup (anchor placement, bricks offset, reparenting bricks under
/// the anchor) runs exactly once, on the call that fills the second slot.
#[derive(Debug, Clone)]
pub struct ModelLoadGate {
    crane: Option<NodeId>,
    bricks: Option<NodeId>,
    state: LoadState,
    failures: Vec<AssetFailure>,
    anchor_position: Vec3,
    bricks_offset: Vec3,
}

impl ModelLoadGate {
    /// Empty gate using the stage's anchor layout.
    #[must_use]
    pub fn new(options: &StageOptions) -> Self {
        Self {
            crane: None,
            bricks: None,
            state: LoadState::Loading,
            failures: Vec::new(),
            anchor_position: Vec3::from_array(options.anchor_position),
            bricks_offset: Vec3::from_array(options.bricks_offset),
        }
    }

    /// Current latch state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Shorthand for `state() == LoadState::Ready`.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Loads that failed so far.
    #[must_use]
    pub fn failures(&self) -> &[AssetFailure] {
        &self.failures
    }

    /// Record that `kind` finished loading as `node`. Returns `true` only on
    /// the call that moves the gate to [`LoadState::Ready`].
    ///
    /// # Errors
    ///
    /// Returns an error if `node` or `anchor` is not in `scene`; the gate
    /// then stays in [`LoadState::Loading`].
    pub fn on_asset_loaded(
        &mut self,
        kind: ModelKind,
        node: NodeId,
        anchor: NodeId,
        scene: &mut SceneGraph,
    ) -> Result<bool, CraneError> {
        if self.is_ready() {
            log::debug!("{kind} loaded again after the gate opened; ignoring");
            return Ok(false);
        }

        match kind {
            ModelKind::Crane => self.crane = Some(node),
            ModelKind::Bricks => self.bricks = Some(node),
        }

        let (Some(_crane), Some(bricks)) = (self.crane, self.bricks) else {
            log::debug!("{kind} loaded, waiting for the other model");
            return Ok(false);
        };

        scene.set_translation(anchor, self.anchor_position)?;
        scene.set_translation(bricks, self.bricks_offset)?;
        scene.reparent(bricks, anchor)?;
        self.state = LoadState::Ready;
        log::info!(
            "both models loaded; anchor at {}, bricks hanging at {}",
            self.anchor_position,
            self.bricks_offset
        );
        Ok(true)
    }

    /// Record that `kind` failed to load. The gate stays in
    /// [`LoadState::Loading`] for good and the scene stays static.
    pub fn on_asset_failed(&mut self, kind: ModelKind, message: String) {
        log::warn!("{kind} model failed to load, load will not swing: {message}");
        self.failures.push(AssetFailure { kind, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, NodeKind, Stage, Transform};

    struct Fixture {
        scene: SceneGraph,
        stage: Stage,
        crane: NodeId,
        bricks: NodeId,
        gate: ModelLoadGate,
    }

    fn fixture() -> Fixture {
        let options = StageOptions::default();
        let mut scene = SceneGraph::new();
        let stage = Stage::build(&mut scene, &options).unwrap();
        let root = scene.root();
        let crane = scene
            .insert(root, Node::new("crane", NodeKind::Group))
            .unwrap();
        let bricks = scene
            .insert(
                root,
                Node::new("bricks", NodeKind::Group).with_transform(
                    Transform::from_translation(Vec3::new(7.0, 7.0, 7.0)),
                ),
            )
            .unwrap();
        Fixture {
            scene,
            stage,
            crane,
            bricks,
            gate: ModelLoadGate::new(&options),
        }
    }

    impl Fixture {
        fn load(&mut self, kind: ModelKind) -> bool {
            let node = match kind {
                ModelKind::Crane => self.crane,
                ModelKind::Bricks => self.bricks,
            };
            self.gate
                .on_asset_loaded(kind, node, self.stage.anchor, &mut self.scene)
                .unwrap()
        }

        fn assert_set_up(&self) {
            let anchor = self.scene.get(self.stage.anchor).unwrap();
            assert_eq!(anchor.transform.translation, Vec3::new(20.0, 35.0, 0.0));
            assert_eq!(anchor.children(), &[self.bricks]);

            let bricks = self.scene.get(self.bricks).unwrap();
            assert_eq!(bricks.parent(), Some(self.stage.anchor));
            assert_eq!(bricks.transform.translation, Vec3::new(0.0, -15.0, 0.0));

            let world = self.scene.world_position(self.bricks).unwrap();
            assert!((world - Vec3::new(20.0, 20.0, 0.0)).length() < 1e-5);
        }
    }

    #[test]
    fn crane_then_bricks_opens_once() {
        let mut f = fixture();
        assert!(!f.load(ModelKind::Crane));
        assert_eq!(f.gate.state(), LoadState::Loading);
        assert!(f.load(ModelKind::Bricks));
        assert!(f.gate.is_ready());
        f.assert_set_up();
    }

    #[test]
    fn bricks_then_crane_opens_once() {
        let mut f = fixture();
        assert!(!f.load(ModelKind::Bricks));
        // Nothing moves before both are in.
        let anchor = f.scene.get(f.stage.anchor).unwrap();
        assert_eq!(anchor.transform, Transform::IDENTITY);
        assert!(f.load(ModelKind::Crane));
        f.assert_set_up();
    }

    #[test]
    fn repeated_loads_fire_exactly_once() {
        let mut f = fixture();
        let fired: Vec<bool> = [
            ModelKind::Crane,
            ModelKind::Bricks,
            ModelKind::Crane,
            ModelKind::Bricks,
        ]
        .into_iter()
        .map(|kind| f.load(kind))
        .collect();
        assert_eq!(fired, vec![false, true, false, false]);
        f.assert_set_up();
    }

    #[test]
    fn crane_twice_before_bricks_still_waits() {
        let mut f = fixture();
        assert!(!f.load(ModelKind::Crane));
        assert!(!f.load(ModelKind::Crane));
        assert_eq!(f.gate.state(), LoadState::Loading);
        assert!(f.load(ModelKind::Bricks));
        f.assert_set_up();
    }

    #[test]
    fn failure_keeps_gate_loading() {
        let mut f = fixture();
        assert!(!f.load(ModelKind::Crane));
        f.gate
            .on_asset_failed(ModelKind::Bricks, "no such file".to_owned());

        assert_eq!(f.gate.state(), LoadState::Loading);
        assert_eq!(
            f.gate.failures(),
            &[AssetFailure {
                kind: ModelKind::Bricks,
                message: "no such file".to_owned(),
            }]
        );
        let bricks = f.scene.get(f.bricks).unwrap();
        assert_eq!(bricks.parent(), Some(f.scene.root()));
    }

    #[test]
    fn structural_error_keeps_gate_closed() {
        let mut f = fixture();
        assert!(!f.load(ModelKind::Crane));
        // Hanging the bricks from themselves cannot be wired up.
        let err = f.gate.on_asset_loaded(
            ModelKind::Bricks,
            f.bricks,
            f.bricks,
            &mut f.scene,
        );
        assert!(matches!(err, Err(CraneError::SceneCycle)));
        assert_eq!(f.gate.state(), LoadState::Loading);
    }
}
