// SPDX-License-Identifier: GPL-3.0-only

//! depth-focus - nearest-object focus tracking for depth cameras
//!
//! Depth frames go in, a smoothed "focus point of interest" (fPOI) comes
//! out: the location of the nearest object, averaged over a window of
//! frames and mapped into the RGB camera's pixel space for overlays and
//! into normalized coordinates for autofocus and auto-exposure.
//!
//! # Architecture
//!
//! - [`tracking`]: depth frames, centroid tracker, coordinate remapping
//! - [`app`]: fPOI processor, preview/focus session, marker overlay
//! - [`backends`]: depth sources and capture loop threads
//! - [`config`]: user configuration handling
//!
//! # Example
//!
//! ```
//! use depth_focus::tracking::{CentroidTracker, DepthFrame, NanPolicy};
//!
//! let mut tracker = CentroidTracker::with_settings(2, NanPolicy::Zero).unwrap();
//! let mut samples = vec![3.0; 16];
//! samples[6] = 0.5;
//! let frame = DepthFrame::new(4, 4, samples).unwrap();
//!
//! assert_eq!(tracker.update(&frame).unwrap(), None);
//! let centroid = tracker.update(&frame).unwrap().unwrap();
//! assert_eq!((centroid.x, centroid.y), (2, 1));
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod tracking;

// Re-export commonly used types
pub use app::{FocusSession, FpoiProcessor, PreviewMode};
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use tracking::{Centroid, CentroidTracker, DepthFrame, NanPolicy};
