// SPDX-License-Identifier: GPL-3.0-only

//! Coordinate remapping between the depth sensor and the RGB camera
//!
//! The two sensors report different native resolutions, so a centroid found
//! in the depth map has to be rescaled before it can be drawn on the camera
//! preview or handed to autofocus, which expects normalized coordinates.

use super::types::Centroid;
use crate::errors::RemapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A point in pixel or normalized space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Centroid> for Point {
    fn from(c: Centroid) -> Self {
        Self::new(f64::from(c.x), f64::from(c.y))
    }
}

/// Image dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }

    /// Both dimensions are positive and finite
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    fn checked(self) -> Result<Self, RemapError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(RemapError::ZeroDimension)
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Rescale a point from one image's pixel space into another's
///
/// x and y scale independently.
pub fn remap(point: Point, from: ImageSize, to: ImageSize) -> Result<Point, RemapError> {
    let from = from.checked()?;
    let to = to.checked()?;
    Ok(Point::new(
        point.x * (to.width / from.width),
        point.y * (to.height / from.height),
    ))
}

/// Map a pixel point into `[0, 1] x [0, 1]` device coordinates
pub fn normalize(point: Point, size: ImageSize) -> Result<Point, RemapError> {
    let size = size.checked()?;
    Ok(Point::new(point.x / size.width, point.y / size.height))
}

/// Native resolutions of the depth and camera streams
///
/// Each side is captured from the first frame its sensor delivers; later
/// observations are ignored until the depth side is cleared for a new
/// depth session.
#[derive(Debug, Default)]
pub struct ResolutionPair {
    depth: OnceLock<ImageSize>,
    camera: OnceLock<ImageSize>,
}

impl ResolutionPair {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pair with both sides already known
    pub fn with_sizes(depth: ImageSize, camera: ImageSize) -> Result<Self, RemapError> {
        let pair = Self::new();
        pair.observe_depth(depth)?;
        pair.observe_camera(camera)?;
        Ok(pair)
    }

    /// Record the depth resolution; returns true on first capture
    pub fn observe_depth(&self, size: ImageSize) -> Result<bool, RemapError> {
        let size = size.checked()?;
        Ok(self.depth.set(size).is_ok())
    }

    /// Record the camera resolution; returns true on first capture
    pub fn observe_camera(&self, size: ImageSize) -> Result<bool, RemapError> {
        let size = size.checked()?;
        Ok(self.camera.set(size).is_ok())
    }

    /// Forget the depth resolution so the next depth frame captures it again
    pub fn clear_depth(&mut self) -> Option<ImageSize> {
        self.depth.take()
    }

    pub fn depth(&self) -> Option<ImageSize> {
        self.depth.get().copied()
    }

    pub fn camera(&self) -> Option<ImageSize> {
        self.camera.get().copied()
    }

    fn sizes(&self) -> Result<(ImageSize, ImageSize), RemapError> {
        match (self.depth(), self.camera()) {
            (Some(depth), Some(camera)) => Ok((depth, camera)),
            _ => Err(RemapError::ResolutionUnknown),
        }
    }

    /// Centroid expressed in camera pixels
    pub fn remap_to_camera(&self, centroid: Centroid) -> Result<Point, RemapError> {
        let (depth, camera) = self.sizes()?;
        remap(centroid.into(), depth, camera)
    }

    /// Centroid as a normalized focus / exposure point of interest
    pub fn focus_point(&self, centroid: Centroid) -> Result<Point, RemapError> {
        let (_, camera) = self.sizes()?;
        normalize(self.remap_to_camera(centroid)?, camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remap_scales_axes_independently() {
        let p = remap(
            Point::new(10.0, 20.0),
            ImageSize::new(100.0, 100.0),
            ImageSize::new(200.0, 50.0),
        )
        .unwrap();
        assert_eq!(p, Point::new(20.0, 10.0));
    }

    #[test]
    fn test_normalize() {
        let p = normalize(Point::new(50.0, 25.0), ImageSize::new(100.0, 50.0)).unwrap();
        assert_eq!(p, Point::new(0.5, 0.5));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let p = Point::new(1.0, 1.0);
        let ok = ImageSize::new(10.0, 10.0);
        assert_eq!(
            normalize(p, ImageSize::new(0.0, 10.0)),
            Err(RemapError::ZeroDimension)
        );
        assert_eq!(
            remap(p, ImageSize::new(10.0, 0.0), ok),
            Err(RemapError::ZeroDimension)
        );
        assert_eq!(
            remap(p, ok, ImageSize::new(0.0, 0.0)),
            Err(RemapError::ZeroDimension)
        );
    }

    #[test]
    fn test_resolution_pair_first_capture_wins() {
        let pair = ResolutionPair::new();
        assert_eq!(pair.observe_depth(ImageSize::from_pixels(256, 192)), Ok(true));
        assert_eq!(pair.observe_depth(ImageSize::from_pixels(640, 480)), Ok(false));
        assert_eq!(pair.depth(), Some(ImageSize::new(256.0, 192.0)));
    }

    #[test]
    fn test_clear_depth_allows_recapture() {
        let mut pair = ResolutionPair::with_sizes(
            ImageSize::from_pixels(256, 192),
            ImageSize::from_pixels(1920, 1440),
        )
        .unwrap();

        assert_eq!(pair.clear_depth(), Some(ImageSize::new(256.0, 192.0)));
        assert_eq!(pair.observe_depth(ImageSize::from_pixels(640, 480)), Ok(true));
        assert_eq!(pair.depth(), Some(ImageSize::new(640.0, 480.0)));
        assert_eq!(pair.camera(), Some(ImageSize::new(1920.0, 1440.0)));
    }

    #[test]
    fn test_focus_point_requires_both_sizes() {
        let pair = ResolutionPair::new();
        pair.observe_depth(ImageSize::from_pixels(256, 192)).unwrap();
        assert_eq!(
            pair.focus_point(Centroid::new(1, 1)),
            Err(RemapError::ResolutionUnknown)
        );
    }

    #[test]
    fn test_focus_point() {
        let pair = ResolutionPair::with_sizes(
            ImageSize::from_pixels(256, 192),
            ImageSize::from_pixels(1920, 1440),
        )
        .unwrap();

        let camera = pair.remap_to_camera(Centroid::new(64, 96)).unwrap();
        assert_eq!(camera, Point::new(480.0, 720.0));

        let focus = pair.focus_point(Centroid::new(64, 96)).unwrap();
        assert_eq!(focus, Point::new(0.25, 0.5));
    }
}
