//! Shared utilities.

/// Deadline-based frame pacing and FPS smoothing.
pub mod frame_timing;

pub use frame_timing::FrameTiming;
