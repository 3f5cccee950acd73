//! Per-tick animation of the suspended load.

pub mod pendulum;

pub use pendulum::{swing_rotation, PendulumState};
