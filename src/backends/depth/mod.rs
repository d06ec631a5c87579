// SPDX-License-Identifier: GPL-3.0-only

//! Depth frame sources
//!
//! A source delivers fixed-size depth frames one at a time. Real sensors
//! drop late frames themselves, so sources never buffer.

pub mod frame_loop;
pub mod recording;
pub mod synthetic;

pub use frame_loop::{CaptureLoopController, LoopAction};
pub use recording::{RecordingSource, write_frame};
pub use synthetic::SyntheticSource;

use crate::errors::SourceError;
use crate::tracking::DepthFrame;

/// Producer of depth frames
pub trait DepthSource: Send {
    /// (width, height) of every frame this source produces
    fn dimensions(&self) -> (u32, u32);

    /// Next frame, or `None` once the stream has ended
    fn next_frame(&mut self) -> Result<Option<DepthFrame>, SourceError>;
}

impl<S: DepthSource + ?Sized> DepthSource for Box<S> {
    fn dimensions(&self) -> (u32, u32) {
        (**self).dimensions()
    }

    fn next_frame(&mut self) -> Result<Option<DepthFrame>, SourceError> {
        (**self).next_frame()
    }
}
