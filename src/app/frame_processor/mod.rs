// SPDX-License-Identifier: GPL-3.0-only

//! Frame processor module for per-frame depth analysis
//!
//! Depth frames are handed to the fPOI task one at a time; its latest
//! centroid is read by overlays and by focus control.

pub mod tasks;
pub mod types;

pub use tasks::FpoiProcessor;
pub use types::{FpoiResult, FrameRegion};
