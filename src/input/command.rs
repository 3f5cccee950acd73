//! Everything a user can ask the frame loop to do.

use glam::Vec2;

/// A single user-facing operation, from a key press, a mouse gesture or a
/// programmatic call. Applied with
/// [`FrameLoop::execute`](crate::frame::FrameLoop::execute).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Flip orbit mode.
    ToggleOrbit,
    /// Set orbit mode explicitly (the checkbox).
    SetOrbit(bool),
    /// Put the camera back at its initial position.
    ResetCamera,
    /// Orbit the camera by a drag delta in pixels.
    RotateCamera(Vec2),
    /// Move the orbit target by a drag delta in pixels.
    PanCamera(Vec2),
    /// Zoom step (positive = closer).
    Zoom(f32),
}
