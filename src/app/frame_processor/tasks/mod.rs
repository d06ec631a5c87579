// SPDX-License-Identifier: GPL-3.0-only

//! Frame processing tasks
//!
//! Each task consumes frames from a capture source and publishes a result
//! for renderers.

pub mod fpoi_tracker;

pub use fpoi_tracker::FpoiProcessor;
