//! Per-tick orchestration.
//!
//! [`FrameLoop`] owns the [`SimulationState`], the scene graph, the camera
//! and its controls, and the in-flight asset loads. Each [`FrameLoop::tick`]
//! runs, in order:
//!
//! 1. drain finished asset loads into the [`ModelLoadGate`];
//! 2. once the gate is open, step the pendulum and rotate the anchor;
//! 3. update the orbit controls (damping/inertia);
//! 4. publish the camera position readout;
//! 5. if orbit mode is on, move the camera onto the orbit circle;
//! 6. render.
//!
//! The readout is taken before the orbit override, so while orbiting it
//! lags the rendered camera by one tick.

mod clock;
mod driver;
mod render;

use std::sync::Arc;
use std::time::Duration;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::{FixedRateDriver, TickControl, TickDriver};
pub use render::{HeadlessTarget, RenderTarget};

use crate::animation::{swing_rotation, PendulumState};
use crate::assets::{
    AssetEvent, AssetFailure, AssetLoader, AssetQueue, AssetRequest,
    LoadedModel, ModelKind, ModelLoadGate,
};
use crate::camera::{Camera, OrbitCameraDriver, OrbitControls, OrbitState, OrbitTransition};
use crate::error::CraneError;
use crate::input::Command;
use crate::options::Options;
use crate::scene::{Node, NodeId, NodeKind, SceneGraph, Stage, Transform};

/// Everything the simulation mutates from tick to tick.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Swing of the suspended load.
    pub pendulum: PendulumState,
    /// Orbit mode on/off.
    pub orbit: OrbitState,
    /// Two-model readiness latch.
    pub load: ModelLoadGate,
}

impl SimulationState {
    /// Startup state: load released at full amplitude, gate closed.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            pendulum: PendulumState::released_at(options.pendulum.amplitude),
            orbit: OrbitState {
                enabled: options.orbit.enabled_at_start,
            },
            load: ModelLoadGate::new(&options.stage),
        }
    }
}

/// The scene's animation loop.
pub struct FrameLoop<C: Clock, R: RenderTarget> {
    options: Options,
    state: SimulationState,
    scene: SceneGraph,
    stage: Stage,
    camera: Camera,
    controls: OrbitControls,
    orbit: OrbitCameraDriver,
    assets: AssetQueue,
    clock: C,
    renderer: R,
    readout: String,
    last_tick: Option<f64>,
    frames: u64,
}

impl<C: Clock, R: RenderTarget> FrameLoop<C, R> {
    /// Build the stage and camera. No assets are requested yet; see
    /// [`start_loading`](Self::start_loading).
    ///
    /// # Errors
    ///
    /// Returns [`CraneError::OptionsParse`] if `options` fail validation,
    /// or an error if the stage cannot be built.
    pub fn new(
        options: Options,
        clock: C,
        renderer: R,
        aspect: f32,
    ) -> Result<Self, CraneError> {
        options.validate()?;
        let mut scene = SceneGraph::new();
        let stage = Stage::build(&mut scene, &options.stage)?;
        let camera = Camera::from_options(&options.camera, aspect);
        let controls = OrbitControls::new(&options.camera, &camera);
        let orbit = OrbitCameraDriver::new(&options.orbit, &options.camera);
        let state = SimulationState::new(&options);
        let readout = camera.position_readout();

        Ok(Self {
            options,
            state,
            scene,
            stage,
            camera,
            controls,
            orbit,
            assets: AssetQueue::idle(),
            clock,
            renderer,
            readout,
            last_tick: None,
            frames: 0,
        })
    }

    /// Request both models from `loader` on background threads.
    ///
    /// # Errors
    ///
    /// Returns [`CraneError::ThreadSpawn`] if a loader thread cannot start.
    pub fn start_loading(
        &mut self,
        loader: Arc<dyn AssetLoader>,
    ) -> Result<(), CraneError> {
        let requests = AssetRequest::from_options(&self.options.assets);
        log::info!(
            "loading {} and {}",
            self.options.assets.crane_path,
            self.options.assets.bricks_path
        );
        self.assets = AssetQueue::spawn(loader, requests)?;
        Ok(())
    }

    /// Number of requested models that have not reported back.
    #[must_use]
    pub fn loads_outstanding(&self) -> usize {
        self.assets.outstanding()
    }

    /// Place a loaded model in the scene and offer it to the gate. A model
    /// that arrives again replaces the payload of its existing node.
    ///
    /// Returns `true` on the call that opens the gate.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be wired up.
    pub fn on_model_loaded(
        &mut self,
        model: LoadedModel,
    ) -> Result<bool, CraneError> {
        let kind = model.kind;
        let node = self.place_model(model)?;
        self.state
            .load
            .on_asset_loaded(kind, node, self.stage.anchor, &mut self.scene)
    }

    /// Record a failed model load. The scene stays static.
    pub fn on_model_failed(&mut self, kind: ModelKind, message: String) {
        self.state.load.on_asset_failed(kind, message);
    }

    fn place_model(&mut self, model: LoadedModel) -> Result<NodeId, CraneError> {
        let name = model.kind.node_name();
        let kind = NodeKind::Model {
            source: model.source,
        };
        if let Some(existing) = self.scene.find(name) {
            if let Some(node) = self.scene.get_mut(existing) {
                node.kind = kind;
            }
            return Ok(existing);
        }

        let scale = match model.kind {
            ModelKind::Crane => self.options.assets.crane_scale,
            ModelKind::Bricks => self.options.assets.bricks_scale,
        };
        let node = Node::new(name, kind)
            .with_transform(Transform::IDENTITY.with_scale(scale));
        log::debug!("{name} model: {} bytes", model.bytes.len());
        self.scene.insert(self.scene.root(), node)
    }

    fn apply_asset_event(&mut self, event: AssetEvent) -> Result<(), CraneError> {
        match event {
            AssetEvent::Loaded(model) => {
                let _ = self.on_model_loaded(model)?;
            }
            AssetEvent::Failed { kind, message } => {
                self.on_model_failed(kind, message);
            }
        }
        Ok(())
    }

    /// Apply every event, even after one fails; the first error wins.
    fn apply_asset_events(
        &mut self,
        events: Vec<AssetEvent>,
    ) -> Result<(), CraneError> {
        let mut first_error = None;
        for event in events {
            if let Err(e) = self.apply_asset_event(event) {
                log::error!("asset event could not be applied: {e}");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Block until every requested model has reported back, waiting at
    /// most `timeout` for each one. Returns how many are still outstanding.
    ///
    /// # Errors
    ///
    /// Returns the first error from wiring a loaded model into the scene.
    /// The remaining loads are still waited for.
    pub fn wait_for_assets(
        &mut self,
        timeout: Duration,
    ) -> Result<usize, CraneError> {
        let mut events = Vec::new();
        while let Some(event) = self.assets.next_timeout(timeout) {
            events.push(event);
        }
        self.apply_asset_events(events)?;
        Ok(self.assets.outstanding())
    }

    /// Run one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if a loaded model cannot be wired into the scene.
    pub fn tick(&mut self) -> Result<(), CraneError> {
        let now = self.clock.now_secs();
        let dt = self.last_tick.map_or(0.0, |last| (now - last).max(0.0)) as f32;
        self.last_tick = Some(now);

        let events = self.assets.drain();
        self.apply_asset_events(events)?;

        if self.state.load.is_ready() {
            self.state.pendulum =
                self.state.pendulum.step(&self.options.pendulum, dt);
            self.scene.set_rotation(
                self.stage.anchor,
                swing_rotation(self.state.pendulum.angle),
            )?;
        }

        if self.state.orbit.enabled {
            // The orbit owns the camera; drags start from where it is.
            self.controls.follow_camera(&self.camera);
        }
        let _ = self.controls.update(&mut self.camera);

        self.readout = self.camera.position_readout();

        let _ = self.orbit.update(self.state.orbit, now, &mut self.camera);

        self.renderer.render(&self.scene, &self.camera, &self.readout);
        self.scene.mark_rendered();
        self.frames += 1;
        Ok(())
    }

    /// Turn orbit mode on or off. Turning it off puts the camera back at
    /// its initial position, once.
    pub fn set_orbit_enabled(&mut self, enabled: bool) -> OrbitTransition {
        let transition =
            self.orbit
                .set_enabled(&mut self.state.orbit, enabled, &mut self.camera);
        if transition == OrbitTransition::Disabled {
            self.controls.sync_from_camera(&self.camera);
        }
        transition
    }

    /// Apply a user command.
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::ToggleOrbit => {
                let _ = self.set_orbit_enabled(!self.state.orbit.enabled);
            }
            Command::SetOrbit(enabled) => {
                let _ = self.set_orbit_enabled(enabled);
            }
            Command::ResetCamera => {
                self.orbit.reset(&mut self.camera);
                self.controls.sync_from_camera(&self.camera);
            }
            Command::RotateCamera(delta) => self.controls.rotate(delta),
            Command::PanCamera(delta) => self.controls.pan(delta),
            Command::Zoom(delta) => self.controls.zoom(delta),
        }
    }

    /// Update the camera aspect after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Current simulation state.
    #[must_use]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Scene graph.
    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Fixed stage node ids.
    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Last published position readout.
    #[must_use]
    pub fn readout(&self) -> &str {
        &self.readout
    }

    /// Frames ticked so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Model loads that failed.
    #[must_use]
    pub fn asset_failures(&self) -> &[AssetFailure] {
        self.state.load.failures()
    }

    /// Options the loop was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Time source.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Render target.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable render target.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::{Vec2, Vec3};

    use super::*;
    use crate::assets::LoadState;
    use crate::scene::{ANCHOR, BRICKS};

    type TestLoop = FrameLoop<ManualClock, HeadlessTarget>;

    fn frame_loop() -> TestLoop {
        FrameLoop::new(
            Options::default(),
            ManualClock::starting_at(0.0),
            HeadlessTarget::default(),
            16.0 / 9.0,
        )
        .unwrap()
    }

    fn model(kind: ModelKind) -> LoadedModel {
        LoadedModel {
            kind,
            source: format!("{kind}.fbx"),
            bytes: vec![0xfb, 0x58],
        }
    }

    fn anchor_rotation(fl: &TestLoop) -> glam::Quat {
        let anchor = fl.scene().find(ANCHOR).unwrap();
        fl.scene().get(anchor).unwrap().transform.rotation
    }

    struct InstantLoader;

    impl AssetLoader for InstantLoader {
        fn load(
            &self,
            request: &AssetRequest,
        ) -> Result<LoadedModel, CraneError> {
            if request.kind == ModelKind::Bricks {
                return Err(CraneError::AssetLoad {
                    kind: request.kind,
                    message: "truncated file".to_owned(),
                });
            }
            Ok(model(request.kind))
        }
    }

    #[test]
    fn pendulum_waits_for_both_models() {
        let mut fl = frame_loop();
        fl.tick().unwrap();
        assert_eq!(fl.state().pendulum.angle, fl.options().pendulum.amplitude);

        let _ = fl.on_model_loaded(model(ModelKind::Crane)).unwrap();
        fl.tick().unwrap();
        assert_eq!(fl.state().pendulum.angle, fl.options().pendulum.amplitude);
        assert_eq!(fl.state().load.state(), LoadState::Loading);

        assert!(fl.on_model_loaded(model(ModelKind::Bricks)).unwrap());
        fl.tick().unwrap();
        let angle = fl.state().pendulum.angle;
        assert!(angle < fl.options().pendulum.amplitude);
        assert!(anchor_rotation(&fl).abs_diff_eq(swing_rotation(angle), 1e-6));
    }

    #[test]
    fn bricks_hang_from_anchor_after_load() {
        let mut fl = frame_loop();
        let _ = fl.on_model_loaded(model(ModelKind::Bricks)).unwrap();
        let _ = fl.on_model_loaded(model(ModelKind::Crane)).unwrap();

        let bricks = fl.scene().find(BRICKS).unwrap();
        let node = fl.scene().get(bricks).unwrap();
        assert_eq!(node.parent(), Some(fl.stage().anchor));
        assert_eq!(node.transform.translation, Vec3::new(0.0, -15.0, 0.0));
        assert_eq!(node.transform.scale, Vec3::splat(0.1));
    }

    #[test]
    fn reloaded_model_reuses_its_node() {
        let mut fl = frame_loop();
        let _ = fl.on_model_loaded(model(ModelKind::Crane)).unwrap();
        let nodes = fl.scene().len();
        let mut again = model(ModelKind::Crane);
        again.source = "crane-v2.fbx".to_owned();
        assert!(!fl.on_model_loaded(again).unwrap());
        assert_eq!(fl.scene().len(), nodes);

        let crane = fl.scene().find("crane").unwrap();
        assert_eq!(
            fl.scene().get(crane).unwrap().kind,
            NodeKind::Model {
                source: "crane-v2.fbx".to_owned()
            }
        );
    }

    #[test]
    fn readout_and_render_every_tick() {
        let mut fl = frame_loop();
        for _ in 0..3 {
            fl.tick().unwrap();
        }
        assert_eq!(fl.frames(), 3);
        assert_eq!(fl.renderer().frames(), 3);
        assert_eq!(fl.readout(), "X: 45.94, Y: 55.71, Z: 58.37");
        assert_eq!(fl.renderer().last_readout(), fl.readout());
    }

    #[test]
    fn orbit_overrides_camera_after_readout() {
        let mut fl = frame_loop();
        assert_eq!(fl.set_orbit_enabled(true), OrbitTransition::Enabled);

        fl.tick().unwrap();
        // Readout was taken before the orbit override moved the camera.
        assert_eq!(fl.readout(), "X: 45.94, Y: 55.71, Z: 58.37");
        assert_eq!(fl.camera().eye, Vec3::new(100.0, 50.0, 0.0));
        assert_eq!(fl.renderer().last_eye(), Some(Vec3::new(100.0, 50.0, 0.0)));

        fl.tick().unwrap();
        assert_eq!(fl.readout(), "X: 100.00, Y: 50.00, Z: 0.00");
    }

    #[test]
    fn orbit_follows_wall_clock() {
        let mut fl = frame_loop();
        let _ = fl.set_orbit_enabled(true);
        fl.clock().set(std::f64::consts::TAU);
        fl.tick().unwrap();
        let eye = fl.camera().eye;
        assert!((eye - Vec3::new(0.0, 50.0, 100.0)).length() < 1e-3);
        assert_eq!(fl.camera().target, Vec3::new(0.0, 20.0, 0.0));
    }

    #[test]
    fn disabling_orbit_restores_initial_view() {
        let mut fl = frame_loop();
        fl.execute(Command::ToggleOrbit);
        fl.clock().advance(3.0);
        fl.tick().unwrap();
        assert_ne!(fl.camera().eye, Vec3::new(45.94, 55.71, 58.37));

        fl.execute(Command::ToggleOrbit);
        assert!(!fl.state().orbit.enabled);
        assert_eq!(fl.camera().eye, Vec3::new(45.94, 55.71, 58.37));
        assert_eq!(fl.camera().target, Vec3::new(0.0, 20.0, 0.0));

        // The controls were re-synced, so an idle tick keeps the view.
        fl.tick().unwrap();
        assert_eq!(fl.camera().eye, Vec3::new(45.94, 55.71, 58.37));
    }

    #[test]
    fn repeated_checkbox_value_is_a_no_op() {
        let mut fl = frame_loop();
        fl.execute(Command::RotateCamera(Vec2::new(50.0, 0.0)));
        fl.tick().unwrap();
        let moved = fl.camera().eye;
        assert_ne!(moved, Vec3::new(45.94, 55.71, 58.37));

        assert_eq!(fl.set_orbit_enabled(false), OrbitTransition::Unchanged);
        assert_eq!(fl.camera().eye, moved);
    }

    #[test]
    fn user_rotation_moves_camera_through_controls() {
        let mut fl = frame_loop();
        fl.execute(Command::RotateCamera(Vec2::new(40.0, 0.0)));
        fl.tick().unwrap();
        let eye = fl.camera().eye;
        assert_ne!(eye, Vec3::new(45.94, 55.71, 58.37));
        // Horizontal drag keeps the height.
        assert!((eye.y - 55.71).abs() < 1e-3);

        fl.execute(Command::ResetCamera);
        assert_eq!(fl.camera().eye, Vec3::new(45.94, 55.71, 58.37));
    }

    #[test]
    fn background_loads_feed_the_gate_and_failures_are_recorded() {
        let mut fl = frame_loop();
        fl.start_loading(Arc::new(InstantLoader)).unwrap();

        let mut spins = 0;
        while fl.loads_outstanding() > 0 {
            fl.tick().unwrap();
            std::thread::sleep(Duration::from_millis(1));
            spins += 1;
            assert!(spins < 5_000, "loads never finished");
        }

        assert!(fl.scene().find("crane").is_some());
        assert!(fl.scene().find(BRICKS).is_none());
        assert_eq!(fl.state().load.state(), LoadState::Loading);
        assert_eq!(fl.asset_failures().len(), 1);
        assert_eq!(fl.asset_failures()[0].kind, ModelKind::Bricks);

        // Degrades to a static scene.
        fl.tick().unwrap();
        assert_eq!(fl.state().pendulum.angle, fl.options().pendulum.amplitude);
    }

    #[test]
    fn swing_stays_within_amplitude_over_many_ticks() {
        let mut fl = frame_loop();
        let _ = fl.on_model_loaded(model(ModelKind::Crane)).unwrap();
        let _ = fl.on_model_loaded(model(ModelKind::Bricks)).unwrap();
        let amplitude = fl.options().pendulum.amplitude;
        for _ in 0..1_000 {
            fl.clock().advance(1.0 / 60.0);
            fl.tick().unwrap();
            assert!(fl.state().pendulum.angle.abs() <= amplitude);
        }
    }

    #[test]
    fn invalid_options_are_rejected_at_construction() {
        let mut options = Options::default();
        options.pendulum.amplitude = -0.1;
        let built = FrameLoop::new(
            options,
            ManualClock::starting_at(0.0),
            HeadlessTarget::default(),
            1.0,
        );
        assert!(matches!(built, Err(CraneError::OptionsParse(_))));

        let mut options = Options::default();
        options.camera.min_distance = 100.0;
        options.camera.max_distance = 10.0;
        let built = FrameLoop::new(
            options,
            ManualClock::starting_at(0.0),
            HeadlessTarget::default(),
            1.0,
        );
        assert!(matches!(built, Err(CraneError::OptionsParse(_))));
    }

    #[test]
    fn later_asset_events_survive_an_earlier_error() {
        let mut fl = frame_loop();
        let _ = fl.on_model_loaded(model(ModelKind::Crane)).unwrap();
        // Bricks already sit above the anchor, so hanging them from it fails.
        let root = fl.scene.root();
        let bricks = fl
            .scene
            .insert(root, Node::new(BRICKS, NodeKind::Group))
            .unwrap();
        fl.scene.reparent(fl.stage.anchor, bricks).unwrap();

        let result = fl.apply_asset_events(vec![
            AssetEvent::Loaded(model(ModelKind::Bricks)),
            AssetEvent::Failed {
                kind: ModelKind::Crane,
                message: "disk error".to_owned(),
            },
        ]);
        assert!(matches!(result, Err(CraneError::SceneCycle)));
        assert_eq!(fl.asset_failures().len(), 1);
        assert_eq!(fl.asset_failures()[0].kind, ModelKind::Crane);
        assert_eq!(fl.state().load.state(), LoadState::Loading);
    }

    fn readout_eye(readout: &str) -> Vec3 {
        let v: Vec<f32> = readout
            .split(", ")
            .map(|part| part[3..].parse().unwrap())
            .collect();
        Vec3::new(v[0], v[1], v[2])
    }

    #[test]
    fn drag_while_orbiting_starts_from_the_orbit_pose() {
        let mut fl = frame_loop();
        let _ = fl.set_orbit_enabled(true);
        fl.tick().unwrap();
        assert_eq!(fl.camera().eye, Vec3::new(100.0, 50.0, 0.0));

        fl.execute(Command::RotateCamera(Vec2::new(20.0, 0.0)));
        fl.tick().unwrap();
        let shown = readout_eye(fl.readout());
        assert!((shown - Vec3::new(100.0, 50.0, 0.0)).length() < 1.0, "{shown}");
        assert_eq!(fl.camera().eye, Vec3::new(100.0, 50.0, 0.0));
    }

    #[test]
    fn wait_for_assets_blocks_until_every_model_reports() {
        let mut fl = frame_loop();
        fl.start_loading(Arc::new(InstantLoader)).unwrap();
        let left = fl.wait_for_assets(Duration::from_secs(5)).unwrap();
        assert_eq!(left, 0);
        assert_eq!(fl.loads_outstanding(), 0);
        assert!(fl.scene().find("crane").is_some());
        assert_eq!(fl.asset_failures().len(), 1);
    }

    #[test]
    fn headless_target_sees_every_node() {
        let mut fl = frame_loop();
        let _ = fl.on_model_loaded(model(ModelKind::Crane)).unwrap();
        let _ = fl.on_model_loaded(model(ModelKind::Bricks)).unwrap();
        fl.tick().unwrap();
        assert_eq!(fl.renderer().last_node_count(), fl.scene().len());
    }
}
