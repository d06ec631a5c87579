// SPDX-License-Identifier: GPL-3.0-only

//! Focus point of interest (fPOI) task
//!
//! Wraps a [`CentroidTracker`] so frames can be fed from a capture thread or
//! an async runtime while renderers read the latest centroid. At most one
//! frame is processed at a time: the tracker lock is held for the whole
//! update, and callers wait for their own frame to finish. Nothing is
//! queued.

use crate::app::frame_processor::types::FpoiResult;
use crate::backends::depth::{CaptureLoopController, DepthSource, LoopAction};
use crate::errors::{AppError, AppResult, TrackerError};
use crate::tracking::{Centroid, CentroidTracker, DepthFrame, SharedCentroid};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Per-frame driver for the centroid tracker
pub struct FpoiProcessor {
    tracker: Mutex<CentroidTracker>,
    latest: SharedCentroid,
}

impl Default for FpoiProcessor {
    fn default() -> Self {
        Self::new(CentroidTracker::new())
    }
}

impl FpoiProcessor {
    pub fn new(tracker: CentroidTracker) -> Self {
        let latest = SharedCentroid::new();
        if let Some(centroid) = tracker.current() {
            latest.store(centroid);
        }
        Self {
            tracker: Mutex::new(tracker),
            latest,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CentroidTracker> {
        // update() never leaves the tracker half-written, so a poisoned
        // lock still guards consistent state
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle for readers of the latest centroid
    pub fn latest(&self) -> SharedCentroid {
        self.latest.clone()
    }

    /// Latest centroid without waiting for an in-flight frame
    pub fn current(&self) -> Option<Centroid> {
        self.latest.load()
    }

    /// Process one frame on the calling thread
    ///
    /// Blocks while another frame is being processed.
    pub fn process_blocking(&self, frame: &DepthFrame) -> Result<FpoiResult, TrackerError> {
        let mut tracker = self.lock();
        let emitted = tracker.update(frame)?;
        if let Some(centroid) = emitted {
            self.latest.store(centroid);
        }
        Ok(FpoiResult {
            emitted,
            current: tracker.current(),
        })
    }

    /// Process one frame on the blocking thread pool and wait for it
    pub async fn process(self: &Arc<Self>, frame: DepthFrame) -> AppResult<FpoiResult> {
        let processor = Arc::clone(self);

        // Run the search in a blocking task to avoid blocking the async runtime
        tokio::task::spawn_blocking(move || processor.process_blocking(&frame))
            .await
            .map_err(|e| {
                warn!(error = %e, "fPOI task panicked");
                AppError::Other(format!("fPOI task failed: {}", e))
            })?
            .map_err(AppError::from)
    }

    /// Forget the tracked state, e.g. when the depth session restarts
    pub fn reset(&self) {
        // Hold the lock until readers are cleared so no frame publishes in between
        let mut tracker = self.lock();
        tracker.reset();
        self.latest.clear();
        drop(tracker);
        debug!("fPOI tracker reset");
    }

    /// Drive this processor from a depth source on a dedicated thread
    ///
    /// The source is created on the loop thread by `init_fn`. The loop ends
    /// when the source runs dry, on a source error, on a rejected frame, or
    /// when the returned controller is stopped or dropped. `on_emit` runs
    /// on the loop thread for every emitted centroid.
    pub fn spawn_loop<S, I, E>(
        self: &Arc<Self>,
        name: &str,
        init_fn: I,
        mut on_emit: E,
    ) -> CaptureLoopController
    where
        S: DepthSource + 'static,
        I: FnOnce() -> Result<S, String> + Send + 'static,
        E: FnMut(Centroid) + Send + 'static,
    {
        let processor = Arc::clone(self);

        CaptureLoopController::start_with_init(name, init_fn, move |source: &mut S| {
            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => return LoopAction::Stop,
                Err(e) => {
                    warn!(error = %e, "Depth source failed");
                    return LoopAction::Stop;
                }
            };

            match processor.process_blocking(&frame) {
                Ok(result) => {
                    if let Some(centroid) = result.emitted {
                        on_emit(centroid);
                    }
                    LoopAction::Continue
                }
                Err(e) => {
                    warn!(error = %e, "Depth frame rejected, stopping loop");
                    LoopAction::Stop
                }
            }
        })
    }
}
