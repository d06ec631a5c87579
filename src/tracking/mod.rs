// SPDX-License-Identifier: GPL-3.0-only

//! Depth-based focus point tracking
//!
//! This module turns raw depth frames into a smoothed nearest-object
//! location and maps that location into camera space.

pub mod remap;
pub mod shared;
pub mod tracker;
pub mod types;

pub use remap::{ImageSize, Point, ResolutionPair, normalize, remap};
pub use shared::SharedCentroid;
pub use tracker::{CentroidTracker, nearest_point};
pub use types::{AccumulatorState, Centroid, DepthFrame, NanPolicy, SAMPLE_SIZE, sample_count};
