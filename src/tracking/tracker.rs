// SPDX-License-Identifier: GPL-3.0-only

//! Nearest-object centroid tracker
//!
//! Each depth frame contributes the location of its nearest sample. Those
//! locations are summed over a fixed window of frames and averaged into a
//! [`Centroid`] once the window is full, which smooths out single-frame
//! jitter in the depth map.

use super::types::{AccumulatorState, Centroid, DepthFrame, NanPolicy};
use crate::constants::DEFAULT_WINDOW_SIZE;
use crate::errors::TrackerError;
use tracing::{debug, trace};

/// Find the nearest sample in a frame
///
/// Returns the (x, y) pixel of the minimum effective depth, taking the first
/// one in row-major order when several samples tie. `None` only when the
/// policy excludes every sample.
pub fn nearest_point(frame: &DepthFrame, policy: NanPolicy) -> Option<(u32, u32)> {
    let mut best: Option<(usize, f32)> = None;

    for (index, &sample) in frame.samples().iter().enumerate() {
        let Some(depth) = policy.resolve(sample) else {
            continue;
        };
        // Strict comparison keeps the first of equal minima
        if best.is_none_or(|(_, min)| depth < min) {
            best = Some((index, depth));
        }
    }

    best.map(|(index, _)| frame.coordinates_of(index))
}

/// Windowed centroid tracker
///
/// The first frame fixes the session's frame dimensions; later frames must
/// match them.
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    state: AccumulatorState,
    window: usize,
    nan_policy: NanPolicy,
    dimensions: Option<(u32, u32)>,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self {
            state: AccumulatorState::new(),
            window: DEFAULT_WINDOW_SIZE,
            nan_policy: NanPolicy::default(),
            dimensions: None,
        }
    }
}

impl CentroidTracker {
    /// Create a tracker with the default 60-frame window and NaN-as-zero policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with a custom window and NaN policy
    pub fn with_settings(window: usize, nan_policy: NanPolicy) -> Result<Self, TrackerError> {
        if window == 0 {
            return Err(TrackerError::InvalidWindow);
        }
        Ok(Self {
            window,
            nan_policy,
            ..Self::default()
        })
    }

    /// Feed one frame
    ///
    /// Returns the freshly emitted centroid when this frame completes a
    /// window, `None` otherwise. A rejected frame leaves the tracker
    /// untouched.
    pub fn update(&mut self, frame: &DepthFrame) -> Result<Option<Centroid>, TrackerError> {
        let dims = frame.dimensions();
        match self.dimensions {
            Some(expected) if expected != dims => {
                return Err(TrackerError::DimensionMismatch {
                    expected,
                    actual: dims,
                });
            }
            Some(_) => {}
            None => {
                debug!(width = dims.0, height = dims.1, "Depth frame size established");
                self.dimensions = Some(dims);
            }
        }

        let Some((x, y)) = nearest_point(frame, self.nan_policy) else {
            trace!("Depth frame has no valid samples, skipping");
            return Ok(None);
        };

        trace!(x, y, count = self.state.count() + 1, "Nearest point");

        let emitted = self.state.accumulate(x, y, self.window);
        if let Some(centroid) = emitted {
            debug!(
                x = centroid.x,
                y = centroid.y,
                window = self.window,
                "Emitted centroid"
            );
        }
        Ok(emitted)
    }

    /// Last emitted centroid, if a window has completed
    pub fn current(&self) -> Option<Centroid> {
        self.state.last()
    }

    pub fn state(&self) -> &AccumulatorState {
        &self.state
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn nan_policy(&self) -> NanPolicy {
        self.nan_policy
    }

    /// Frame dimensions established by the first frame
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// Forget all accumulated state, the last centroid and the frame size
    pub fn reset(&mut self) {
        self.state = AccumulatorState::new();
        self.dimensions = None;
    }
}
