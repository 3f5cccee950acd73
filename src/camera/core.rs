use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera at its configured resting position, aimed at the look target.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from_array(options.initial_position),
            target: Vec3::from_array(options.look_target),
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Aim at `target`, keeping world up.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        self.up = Vec3::Y;
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Unit vector from the eye toward the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix with a [0,1] depth range.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// Eye position as `"X: 1.00, Y: 2.00, Z: 3.00"`.
    #[must_use]
    pub fn position_readout(&self) -> String {
        format_readout(self.eye)
    }
}

/// Two-decimal position readout.
#[must_use]
pub fn format_readout(position: Vec3) -> String {
    format!(
        "X: {:.2}, Y: {:.2}, Z: {:.2}",
        position.x, position.y, position.z
    )
}
