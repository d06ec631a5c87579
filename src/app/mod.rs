// SPDX-License-Identifier: GPL-3.0-only

//! Application layer
//!
//! - `frame_processor`: per-frame fPOI tracking task
//! - `focus`: preview mode switching and focus point of interest
//! - `overlay`: marker drawing on preview images
//! - `utils`: argument parsing helpers

pub mod focus;
pub mod frame_processor;
pub mod overlay;
pub mod utils;

pub use focus::{
    ExposureMode, FocusControl, FocusMode, FocusRequest, FocusSession, LogFocusControl,
    PreviewMode,
};
pub use frame_processor::{FpoiProcessor, FpoiResult, FrameRegion};
pub use overlay::{MarkerStyle, depth_preview, draw_marker};
