//! Model asset loading and the two-model readiness gate.
//!
//! Loads complete on background threads and are handed to the frame loop
//! as [`AssetEvent`]s. The frame loop feeds them into the
//! [`ModelLoadGate`], which performs the one-time anchor setup once both
//! the crane and the bricks have arrived.

pub mod gate;
pub mod loader;

use std::fmt;
use std::path::PathBuf;

pub use gate::{AssetFailure, LoadState, ModelLoadGate};
pub use loader::{AssetLoader, AssetQueue, FsAssetLoader};

use crate::options::AssetOptions;
use crate::scene::{BRICKS, CRANE};

/// The two models the scene waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// The crane structure.
    Crane,
    /// The suspended load.
    Bricks,
}

impl ModelKind {
    /// Both kinds, in load order.
    pub const ALL: [Self; 2] = [Self::Crane, Self::Bricks];

    /// Scene node name used for this model.
    #[must_use]
    pub fn node_name(self) -> &'static str {
        match self {
            Self::Crane => CRANE,
            Self::Bricks => BRICKS,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.node_name())
    }
}

/// One model to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    /// Which slot the model fills.
    pub kind: ModelKind,
    /// Where to read it from.
    pub path: PathBuf,
}

impl AssetRequest {
    /// Requests for both models from the configured paths.
    #[must_use]
    pub fn from_options(options: &AssetOptions) -> Vec<Self> {
        vec![
            Self {
                kind: ModelKind::Crane,
                path: PathBuf::from(&options.crane_path),
            },
            Self {
                kind: ModelKind::Bricks,
                path: PathBuf::from(&options.bricks_path),
            },
        ]
    }
}

/// A loaded model. The payload is opaque to this crate; it is carried for
/// whoever renders the scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModel {
    /// Which slot the model fills.
    pub kind: ModelKind,
    /// Where it was read from.
    pub source: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Completion notice for one [`AssetRequest`].
#[derive(Debug)]
pub enum AssetEvent {
    /// The model is available.
    Loaded(LoadedModel),
    /// The model could not be loaded; it will not be retried.
    Failed {
        /// Which model failed.
        kind: ModelKind,
        /// Human-readable cause.
        message: String,
    },
}
