//! Crate-level error types.

use std::fmt;

use crate::assets::ModelKind;

/// Errors produced by the crane-swing crate.
#[derive(Debug)]
pub enum CraneError {
    /// A model asset could not be loaded.
    AssetLoad {
        /// Which model failed.
        kind: ModelKind,
        /// Human-readable cause.
        message: String,
    },
    /// A scene node id or name did not resolve.
    UnknownNode(String),
    /// A node with this name already exists.
    DuplicateNode(String),
    /// Reparenting would make a node its own ancestor.
    SceneCycle,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for CraneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetLoad { kind, message } => {
                write!(f, "failed to load {kind} model: {message}")
            }
            Self::UnknownNode(name) => write!(f, "unknown scene node: {name}"),
            Self::DuplicateNode(name) => {
                write!(f, "scene node already exists: {name}")
            }
            Self::SceneCycle => {
                write!(f, "reparent would create a cycle in the scene graph")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for CraneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CraneError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
