// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Test code may unwrap.
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Swinging-load crane scene: a pendulum integrator, a time-driven orbit
//! camera, and the frame loop that ties them to a scene graph.
//!
//! A crane and a "bricks" load are loaded on background threads. Once both
//! have arrived, the bricks are hung from an anchor node and swing as a
//! single-degree-of-freedom pendulum, one integration step per frame. The
//! camera is either user-driven (orbit controls with inertia) or, in orbit
//! mode, circles the scene as a function of wall-clock time.
//!
//! # Key entry points
//!
//! - [`frame::FrameLoop`] - owns the simulation state and runs one tick at
//!   a time
//! - [`animation::PendulumState`] - the pendulum integrator
//! - [`camera::OrbitCameraDriver`] - orbit mode
//! - [`assets::ModelLoadGate`] - joins the two model loads
//! - [`options::Options`] - TOML-backed configuration
//! - `Viewer` (feature `viewer`) - a winit window driving the loop

pub mod animation;
pub mod assets;
pub mod camera;
pub mod error;
pub mod frame;
pub mod input;
pub mod options;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;

pub use error::CraneError;
pub use frame::{FrameLoop, SimulationState};
pub use input::Command;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
