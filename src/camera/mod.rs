//! Camera system for the crane scene.
//!
//! Provides the perspective camera, user-driven orbit controls with
//! inertia, and the time-driven orbit mode.

/// User-driven orbit controls with damping.
pub mod controls;
/// Core camera struct and readout formatting.
pub mod core;
/// Time-driven orbit mode.
pub mod orbit;

pub use controls::OrbitControls;
pub use self::core::{format_readout, Camera};
pub use orbit::{orbit_position, OrbitCameraDriver, OrbitState, OrbitTransition};
