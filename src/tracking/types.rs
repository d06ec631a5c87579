// SPDX-License-Identifier: GPL-3.0-only

//! Core types for depth tracking
//!
//! A [`DepthFrame`] is validated once at construction, so everything
//! downstream can index it without bounds or size checks.

use crate::errors::TrackerError;
use serde::{Deserialize, Serialize};

/// A row-major grid of depth samples in meters
///
/// Samples are finite non-negative distances, or NaN where the sensor had
/// no reading.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

/// Number of samples in a `width` x `height` frame
///
/// Also checks that the frame's byte length is addressable.
pub fn sample_count(width: u32, height: u32) -> Result<usize, TrackerError> {
    if width == 0 || height == 0 {
        return Err(TrackerError::EmptyFrame);
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|count| count.checked_mul(SAMPLE_SIZE).is_some())
        .ok_or(TrackerError::TooLarge { width, height })
}

/// Bytes per encoded depth sample
pub const SAMPLE_SIZE: usize = std::mem::size_of::<f32>();

impl DepthFrame {
    /// Create a frame, rejecting zero dimensions and mismatched sample counts
    pub fn new(width: u32, height: u32, samples: Vec<f32>) -> Result<Self, TrackerError> {
        let expected = sample_count(width, height)?;
        if samples.len() != expected {
            return Err(TrackerError::SizeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Create a frame where every sample has the same value
    pub fn filled(width: u32, height: u32, value: f32) -> Result<Self, TrackerError> {
        Self::new(width, height, vec![value; sample_count(width, height)?])
    }

    /// Decode a frame from a little-endian `f32` depth buffer
    ///
    /// The buffer must contain exactly `width * height` samples with no row
    /// padding. Alignment of `bytes` does not matter.
    pub fn from_le_bytes(width: u32, height: u32, bytes: &[u8]) -> Result<Self, TrackerError> {
        let expected = sample_count(width, height)?;
        if bytes.len() != expected * SAMPLE_SIZE {
            return Err(TrackerError::SizeMismatch {
                expected,
                actual: bytes.len() / SAMPLE_SIZE,
            });
        }

        let samples = bytes
            .chunks_exact(SAMPLE_SIZE)
            .map(|chunk| f32::from_le_bytes(bytemuck::pod_read_unaligned(chunk)))
            .collect();
        Self::new(width, height, samples)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample at pixel (x, y), or None outside the frame
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Convert a row-major flattened index to (x, y)
    pub fn coordinates_of(&self, index: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((index % width) as u32, (index / width) as u32)
    }
}

/// How NaN depth samples take part in the nearest-point search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NanPolicy {
    /// Read NaN as 0.0, so dropout regions count as nearest
    #[default]
    Zero,
    /// Skip NaN samples entirely
    Exclude,
}

impl NanPolicy {
    /// Effective depth of a sample under this policy
    #[inline]
    pub fn resolve(self, sample: f32) -> Option<f32> {
        match (self, sample.is_nan()) {
            (_, false) => Some(sample),
            (NanPolicy::Zero, true) => Some(0.0),
            (NanPolicy::Exclude, true) => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NanPolicy::Zero => "Zero",
            NanPolicy::Exclude => "Exclude",
        }
    }
}

/// Tracked nearest-object location in depth-sensor pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Centroid {
    pub x: u32,
    pub y: u32,
}

impl Centroid {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Running sums for the current averaging window
///
/// `count` stays within `[0, window]`; the sums are cleared together with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccumulatorState {
    sum_x: u64,
    sum_y: u64,
    count: usize,
    last: Option<Centroid>,
}

impl AccumulatorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sum_x(&self) -> u64 {
        self.sum_x
    }

    pub fn sum_y(&self) -> u64 {
        self.sum_y
    }

    /// Frames accumulated since the last emitted centroid
    pub fn count(&self) -> usize {
        self.count
    }

    /// Most recently emitted centroid
    pub fn last(&self) -> Option<Centroid> {
        self.last
    }

    /// Add one nearest point; emit the window average once `window` frames
    /// have been collected
    pub fn accumulate(&mut self, x: u32, y: u32, window: usize) -> Option<Centroid> {
        self.sum_x += u64::from(x);
        self.sum_y += u64::from(y);
        self.count += 1;

        if self.count < window {
            return None;
        }

        let count = self.count as u64;
        let centroid = Centroid::new((self.sum_x / count) as u32, (self.sum_y / count) as u32);
        self.last = Some(centroid);
        self.clear_window();
        Some(centroid)
    }

    /// Drop the partial window, keeping the last emitted centroid
    pub fn clear_window(&mut self) {
        self.sum_x = 0;
        self.sum_y = 0;
        self.count = 0;
    }
}
