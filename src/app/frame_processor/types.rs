// SPDX-License-Identifier: GPL-3.0-only

//! Result types for per-frame fPOI processing
//!
//! These are handed to overlay renderers and focus control.

use crate::errors::RemapError;
use crate::tracking::{Centroid, ImageSize, Point};

/// Outcome of feeding one depth frame to the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FpoiResult {
    /// Centroid emitted by this frame, if it completed a window
    pub emitted: Option<Centroid>,
    /// Latest centroid after this frame (emitted now or earlier)
    pub current: Option<Centroid>,
}

/// Marker footprint on a preview, as fractions of the frame size
///
/// `(x, y)` is the top-left corner. Renderers multiply by their own display
/// size.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FrameRegion {
    /// Region covered by a square marker whose top-left corner is `point`
    ///
    /// The region is clipped to the frame; a marker entirely outside the
    /// frame yields a zero-sized region at the nearest edge.
    pub fn marker(point: Point, marker_size: u32, frame: ImageSize) -> Result<Self, RemapError> {
        if !frame.is_valid() {
            return Err(RemapError::ZeroDimension);
        }
        let size = f64::from(marker_size);
        let left = point.x.clamp(0.0, frame.width);
        let top = point.y.clamp(0.0, frame.height);
        let right = (point.x + size).clamp(0.0, frame.width);
        let bottom = (point.y + size).clamp(0.0, frame.height);

        Ok(Self {
            x: (left / frame.width) as f32,
            y: (top / frame.height) as f32,
            width: ((right - left) / frame.width) as f32,
            height: ((bottom - top) / frame.height) as f32,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
