//! Background worker for dataset loading
//!
//! CSV parsing runs off the UI thread. Each request resolves exactly once,
//! with the full dataset or with an error; there is no partial result.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread::{self, JoinHandle};

use crate::data::Dataset;
use crate::error::{DashboardError, Result};

/// Requests that can be sent to the background loader
pub enum LoadRequest {
    /// Load a survey CSV
    LoadFile { path: PathBuf, separator: u8 },
    /// Shutdown the worker
    Shutdown,
}

/// Outcome of one load request
pub enum LoadResult {
    Loaded { path: PathBuf, dataset: Dataset },
    Failed { path: PathBuf, error: DashboardError },
}

/// Background loader that parses datasets off the main thread
pub struct BackgroundLoader {
    tx: Sender<LoadRequest>,
    rx: Receiver<LoadResult>,
    handle: Option<JoinHandle<()>>,
    pending: usize,
}

impl BackgroundLoader {
    /// Spawn a new background loader thread
    pub fn spawn() -> Self {
        let (req_tx, req_rx) = channel::<LoadRequest>();
        let (res_tx, res_rx) = channel::<LoadResult>();

        let handle = thread::spawn(move || {
            Self::worker_loop(req_rx, res_tx);
        });

        Self {
            tx: req_tx,
            rx: res_rx,
            handle: Some(handle),
            pending: 0,
        }
    }

    fn worker_loop(rx: Receiver<LoadRequest>, tx: Sender<LoadResult>) {
        while let Ok(request) = rx.recv() {
            let result = match request {
                LoadRequest::LoadFile { path, separator } => {
                    match Dataset::load(&path, separator) {
                        Ok(dataset) => LoadResult::Loaded { path, dataset },
                        Err(error) => LoadResult::Failed { path, error },
                    }
                }
                LoadRequest::Shutdown => break,
            };

            if tx.send(result).is_err() {
                break;
            }
        }
    }

    /// Queue a dataset load (non-blocking)
    pub fn load(&mut self, path: PathBuf, separator: u8) -> Result<()> {
        tracing::info!(path = %path.display(), "loading dataset");
        self.tx
            .send(LoadRequest::LoadFile { path, separator })
            .map_err(|_| DashboardError::LoaderUnavailable)?;
        self.pending += 1;
        Ok(())
    }

    /// Poll for a completed load (non-blocking)
    pub fn poll(&mut self) -> Option<LoadResult> {
        match self.rx.try_recv() {
            Ok(result) => {
                self.pending = self.pending.saturating_sub(1);
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Check if a load is still in flight
    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }
}

impl Drop for BackgroundLoader {
    fn drop(&mut self) {
        let _ = self.tx.send(LoadRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
