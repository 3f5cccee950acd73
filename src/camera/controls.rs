//! User-driven orbit controls with inertia.
//!
//! The eye orbits `target` on a sphere. Input accumulates pending motion;
//! each [`OrbitControls::update`] applies a `damping_factor` fraction of it
//! and keeps the rest for later ticks, so the camera coasts to a stop after
//! the user lets go.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// Keeps the eye off the poles, where the up vector degenerates.
const POLAR_EPSILON: f32 = 1e-4;
/// Pending motion below this is treated as settled.
const SETTLE_EPSILON: f32 = 1e-6;

/// Spherical orbit state plus pending (damped) input.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,

    pending_rotate: Vec2,
    pending_pan: Vec3,
    pending_scale: f32,

    damping_factor: f32,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitControls {
    /// Controls orbiting the camera's current target from its current eye.
    #[must_use]
    pub fn new(options: &CameraOptions, camera: &Camera) -> Self {
        let mut controls = Self {
            target: camera.target,
            radius: 1.0,
            theta: 0.0,
            phi: PI / 2.0,
            pending_rotate: Vec2::ZERO,
            pending_pan: Vec3::ZERO,
            pending_scale: 1.0,
            damping_factor: options.damping_factor,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            min_distance: options.min_distance,
            max_distance: options.max_distance,
        };
        controls.sync_from_camera(camera);
        controls
    }

    /// Re-derive the spherical state from a camera that was moved by
    /// someone else, dropping any pending motion.
    pub fn sync_from_camera(&mut self, camera: &Camera) {
        self.follow_camera(camera);
        self.pending_rotate = Vec2::ZERO;
        self.pending_pan = Vec3::ZERO;
        self.pending_scale = 1.0;
    }

    /// Re-derive the spherical state from `camera` but keep queued motion,
    /// so input given while something else drives the camera starts from
    /// where the camera actually is.
    pub fn follow_camera(&mut self, camera: &Camera) {
        let offset = camera.eye - camera.target;
        self.target = camera.target;
        self.radius = offset.length();
        self.theta = offset.x.atan2(offset.z);
        self.phi = if self.radius > 0.0 {
            (offset.y / self.radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };
    }

    /// Queue a rotation from a mouse drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.pending_rotate -= delta * self.rotate_speed;
    }

    /// Queue a pan of the target from a mouse drag of `delta` pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let forward = -self.offset().normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        self.pending_pan +=
            right * (-delta.x * self.pan_speed) + up * (delta.y * self.pan_speed);
    }

    /// Queue a zoom step (positive = closer).
    pub fn zoom(&mut self, delta: f32) {
        self.pending_scale *= (1.0 - delta * self.zoom_speed).max(0.01);
    }

    /// Whether any queued motion is still being applied.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.pending_rotate.length_squared() > SETTLE_EPSILON * SETTLE_EPSILON
            || self.pending_pan.length_squared() > SETTLE_EPSILON * SETTLE_EPSILON
            || (self.pending_scale - 1.0).abs() > SETTLE_EPSILON
    }

    /// Current distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Current orbit center.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    fn offset(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }

    /// Apply one tick of damped motion and write the camera. Leaves the
    /// camera untouched once motion has settled. Returns whether the camera
    /// was written.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.is_moving() {
            self.pending_rotate = Vec2::ZERO;
            self.pending_pan = Vec3::ZERO;
            self.pending_scale = 1.0;
            return false;
        }

        let factor = if self.damping_factor > 0.0 {
            self.damping_factor.min(1.0)
        } else {
            1.0
        };

        self.theta += self.pending_rotate.x * factor;
        self.phi = (self.phi + self.pending_rotate.y * factor)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.pending_rotate *= 1.0 - factor;

        self.target += self.pending_pan * factor;
        self.pending_pan *= 1.0 - factor;

        self.radius = (self.radius * self.pending_scale)
            .clamp(self.min_distance, self.max_distance);
        self.pending_scale = 1.0;

        camera.eye = self.target + self.offset();
        camera.look_at(self.target);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (OrbitControls, Camera) {
        let options = CameraOptions::default();
        let camera = Camera::from_options(&options, 1.0);
        (OrbitControls::new(&options, &camera), camera)
    }

    #[test]
    fn sync_round_trips_camera_position() {
        let (controls, camera) = setup();
        let rebuilt = controls.target() + controls.offset();
        assert!((rebuilt - camera.eye).length() < 1e-3);
        assert!((controls.distance() - (camera.eye - camera.target).length()).abs() < 1e-4);
    }

    #[test]
    fn idle_update_leaves_camera_untouched() {
        let (mut controls, mut camera) = setup();
        let before = camera.clone();
        assert!(!controls.update(&mut camera));
        assert_eq!(camera, before);
    }

    #[test]
    fn rotation_is_applied_gradually_and_settles() {
        let (mut controls, mut camera) = setup();
        let start_distance = controls.distance();
        controls.rotate(Vec2::new(100.0, 0.0));

        assert!(controls.update(&mut camera));
        let first = camera.eye;
        assert!(controls.is_moving());

        let mut ticks = 0;
        while controls.update(&mut camera) {
            ticks += 1;
            assert!(ticks < 10_000, "controls never settled");
        }
        assert!(ticks > 10);
        assert!((camera.eye - first).length() > 0.0);
        // Pure rotation keeps the orbit radius.
        assert!(((camera.eye - camera.target).length() - start_distance).abs() < 1e-2);
    }

    #[test]
    fn polar_angle_is_clamped_at_the_pole() {
        let (mut controls, mut camera) = setup();
        controls.rotate(Vec2::new(0.0, 1.0e6));
        while controls.update(&mut camera) {}
        let dir = (camera.eye - camera.target).normalize();
        assert!(dir.is_finite() && dir.y > 0.99);
    }

    #[test]
    fn zoom_respects_distance_limits() {
        let (mut controls, mut camera) = setup();
        for _ in 0..200 {
            controls.zoom(5.0);
            let _ = controls.update(&mut camera);
        }
        assert!((controls.distance() - 5.0).abs() < 1e-4);

        for _ in 0..200 {
            controls.zoom(-5.0);
            let _ = controls.update(&mut camera);
        }
        assert!((controls.distance() - 1000.0).abs() < 1e-2);
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let (mut controls, mut camera) = setup();
        let offset_before = camera.eye - camera.target;
        controls.pan(Vec2::new(10.0, 0.0));
        while controls.update(&mut camera) {}
        let offset_after = camera.eye - camera.target;
        assert!((offset_after - offset_before).length() < 1e-2);
        assert!((camera.target - Vec3::new(0.0, 20.0, 0.0)).length() > 0.5);
    }

    #[test]
    fn follow_camera_keeps_pending_motion() {
        let (mut controls, mut camera) = setup();
        controls.rotate(Vec2::new(20.0, 0.0));

        let mut moved = camera.clone();
        moved.eye = Vec3::new(100.0, 50.0, 0.0);
        controls.follow_camera(&moved);
        assert!(controls.is_moving());
        assert!((controls.distance() - (moved.eye - moved.target).length()).abs() < 1e-4);

        assert!(controls.update(&mut camera));
        // Rotation continues from the followed pose, not the original one.
        assert!((camera.eye - moved.eye).length() < 1.0);
    }
}
