//! Background model loading.
//!
//! Each request runs on its own named thread. Completions land in a channel
//! that the frame loop drains between ticks, so the simulation only ever
//! sees them on its own thread, one at a time.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use super::{AssetEvent, AssetRequest, LoadedModel};
use crate::error::CraneError;

/// Something that can turn an [`AssetRequest`] into a [`LoadedModel`].
pub trait AssetLoader: Send + Sync {
    /// Load one model, blocking the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`CraneError::AssetLoad`] when the model cannot be read.
    fn load(&self, request: &AssetRequest) -> Result<LoadedModel, CraneError>;
}

/// Reads model files from disk without interpreting them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsAssetLoader;

impl AssetLoader for FsAssetLoader {
    fn load(&self, request: &AssetRequest) -> Result<LoadedModel, CraneError> {
        let bytes =
            std::fs::read(&request.path).map_err(|e| CraneError::AssetLoad {
                kind: request.kind,
                message: format!("{}: {e}", request.path.display()),
            })?;
        if bytes.is_empty() {
            return Err(CraneError::AssetLoad {
                kind: request.kind,
                message: format!("{}: file is empty", request.path.display()),
            });
        }
        Ok(LoadedModel {
            kind: request.kind,
            source: request.path.display().to_string(),
            bytes,
        })
    }
}

/// In-flight loads and their completion channel.
pub struct AssetQueue {
    event_rx: mpsc::Receiver<AssetEvent>,
    outstanding: usize,
    threads: Vec<JoinHandle<()>>,
}

impl AssetQueue {
    /// A queue with nothing in flight.
    #[must_use]
    pub fn idle() -> Self {
        let (_event_tx, event_rx) = mpsc::channel();
        Self {
            event_rx,
            outstanding: 0,
            threads: Vec::new(),
        }
    }

    /// Start one loader thread per request.
    ///
    /// # Errors
    ///
    /// Returns [`CraneError::ThreadSpawn`] if a thread fails to start.
    /// Threads already started are detached and their results discarded.
    pub fn spawn(
        loader: Arc<dyn AssetLoader>,
        requests: Vec<AssetRequest>,
    ) -> Result<Self, CraneError> {
        let (event_tx, event_rx) = mpsc::channel();
        let mut threads = Vec::with_capacity(requests.len());

        for request in requests {
            let loader = Arc::clone(&loader);
            let event_tx = event_tx.clone();
            let handle = std::thread::Builder::new()
                .name(format!("asset-{}", request.kind))
                .spawn(move || {
                    log::debug!("loading {} from {}", request.kind, request.path.display());
                    let event = match loader.load(&request) {
                        Ok(model) => AssetEvent::Loaded(model),
                        Err(e) => AssetEvent::Failed {
                            kind: request.kind,
                            message: e.to_string(),
                        },
                    };
                    // The receiver is gone only if the queue was dropped.
                    let _ = event_tx.send(event);
                })
                .map_err(CraneError::ThreadSpawn)?;
            threads.push(handle);
        }

        Ok(Self {
            event_rx,
            outstanding: threads.len(),
            threads,
        })
    }

    /// Number of loads that have not reported back yet.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Every completion received so far. Never blocks.
    pub fn drain(&mut self) -> Vec<AssetEvent> {
        let events: Vec<AssetEvent> = self.event_rx.try_iter().collect();
        self.outstanding = self.outstanding.saturating_sub(events.len());
        events
    }

    /// Block for the next completion, up to `timeout`.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<AssetEvent> {
        if self.outstanding == 0 {
            return None;
        }
        let event = self.event_rx.recv_timeout(timeout).ok()?;
        self.outstanding -= 1;
        Some(event)
    }
}

impl Drop for AssetQueue {
    fn drop(&mut self) {
        for handle in self.threads.drain(..) {
            let _ = handle.join();
        }
    }
}
