// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic depth source
//!
//! Produces a flat background with a single near target that orbits the
//! frame center. Useful for demos and for exercising the tracker without a
//! sensor attached.

use super::DepthSource;
use crate::errors::SourceError;
use crate::tracking::{DepthFrame, sample_count};
use std::f64::consts::TAU;
use std::time::{Duration, Instant};

/// Background distance in meters
const BACKGROUND_DEPTH: f32 = 3.0;
/// Target distance in meters
const TARGET_DEPTH: f32 = 0.5;
/// Frames per full orbit
const ORBIT_PERIOD: usize = 240;

pub struct SyntheticSource {
    width: u32,
    height: u32,
    frame_limit: Option<usize>,
    interval: Option<Duration>,
    dropout_columns: u32,
    index: usize,
    last_emit: Option<Instant>,
}

impl SyntheticSource {
    /// Unpaced, unlimited source of `width` x `height` frames
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame_limit: None,
            interval: None,
            dropout_columns: 0,
            index: 0,
            last_emit: None,
        }
    }

    /// End the stream after `frames` frames
    pub fn with_frame_limit(mut self, frames: usize) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Pace frames like a live sensor
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Mark the leftmost `columns` columns as sensor dropout (NaN)
    pub fn with_dropout_columns(mut self, columns: u32) -> Self {
        self.dropout_columns = columns;
        self
    }

    /// Target pixel for a given frame index
    pub fn target_at(&self, index: usize) -> (u32, u32) {
        let angle = TAU * (index % ORBIT_PERIOD) as f64 / ORBIT_PERIOD as f64;
        let cx = f64::from(self.width) / 2.0;
        let cy = f64::from(self.height) / 2.0;
        let radius = cx.min(cy) / 2.0;

        let x = (cx + radius * angle.cos()).floor();
        let y = (cy + radius * angle.sin()).floor();
        (
            (x.max(0.0) as u32).min(self.width.saturating_sub(1)),
            (y.max(0.0) as u32).min(self.height.saturating_sub(1)),
        )
    }

    fn render(&self, index: usize) -> Result<DepthFrame, SourceError> {
        let width = self.width as usize;
        let mut samples = vec![BACKGROUND_DEPTH; sample_count(self.width, self.height)?];

        if self.dropout_columns > 0 {
            let columns = (self.dropout_columns as usize).min(width);
            for row in samples.chunks_exact_mut(width) {
                row[..columns].fill(f32::NAN);
            }
        }

        let (x, y) = self.target_at(index);
        samples[y as usize * width + x as usize] = TARGET_DEPTH;

        Ok(DepthFrame::new(self.width, self.height, samples)?)
    }

    fn pace(&mut self) {
        if let (Some(interval), Some(last)) = (self.interval, self.last_emit) {
            let elapsed = last.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
        self.last_emit = Some(Instant::now());
    }
}

impl DepthSource for SyntheticSource {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn next_frame(&mut self) -> Result<Option<DepthFrame>, SourceError> {
        if self.frame_limit.is_some_and(|limit| self.index >= limit) {
            return Ok(None);
        }

        self.pace();
        let frame = self.render(self.index)?;
        self.index += 1;
        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{NanPolicy, nearest_point};

    #[test]
    fn test_target_is_nearest_sample() {
        let mut source = SyntheticSource::new(32, 24).with_frame_limit(3);
        for index in 0..3 {
            let frame = source.next_frame().unwrap().unwrap();
            assert_eq!(
                nearest_point(&frame, NanPolicy::Exclude),
                Some(source.target_at(index))
            );
        }
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_dropout_columns_are_nan() {
        let mut source = SyntheticSource::new(16, 8).with_dropout_columns(2);
        let frame = source.next_frame().unwrap().unwrap();
        assert!(frame.get(0, 3).unwrap().is_nan());
        assert!(frame.get(1, 7).unwrap().is_nan());
        assert!(!frame.get(2, 0).unwrap().is_nan());

        // Dropout wins under the zero policy
        assert_eq!(nearest_point(&frame, NanPolicy::Zero), Some((0, 0)));
    }

    #[test]
    fn test_zero_sized_source_fails() {
        let mut source = SyntheticSource::new(0, 8);
        assert!(source.next_frame().is_err());
    }
}
