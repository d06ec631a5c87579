// SPDX-License-Identifier: GPL-3.0-only

//! fPOI marker overlay
//!
//! Draws a filled square at the tracked point on a preview image. The point
//! is the marker's top-left corner.

use crate::config::Config;
use crate::tracking::{DepthFrame, Point};
use image::{Rgba, RgbaImage};

/// Marker appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub size: u32,
    pub color: [u8; 4],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for MarkerStyle {
    fn from(config: &Config) -> Self {
        Self {
            size: config.marker_size,
            color: config.marker_color,
        }
    }
}

/// Draw the marker, clipped to the image
///
/// Returns false when no pixel of the marker falls inside the image.
pub fn draw_marker(image: &mut RgbaImage, point: Point, style: MarkerStyle) -> bool {
    if !point.x.is_finite() || !point.y.is_finite() {
        return false;
    }

    let (width, height) = image.dimensions();
    let size = f64::from(style.size);
    let left = point.x.floor().max(0.0);
    let top = point.y.floor().max(0.0);
    let right = (point.x.floor() + size).min(f64::from(width));
    let bottom = (point.y.floor() + size).min(f64::from(height));

    if left >= right || top >= bottom {
        return false;
    }

    let color = Rgba(style.color);
    for y in top as u32..bottom as u32 {
        for x in left as u32..right as u32 {
            image.put_pixel(x, y, color);
        }
    }
    true
}

/// Grayscale rendering of a depth frame for previews
///
/// Near is bright, `max_depth` and beyond are black, NaN is black.
pub fn depth_preview(frame: &DepthFrame, max_depth: f32) -> RgbaImage {
    let (width, height) = frame.dimensions();
    let max_depth = if max_depth > 0.0 { max_depth } else { 1.0 };

    RgbaImage::from_fn(width, height, |x, y| {
        let depth = frame.get(x, y).unwrap_or(f32::NAN);
        let level = if depth.is_nan() {
            0
        } else {
            ((1.0 - (depth / max_depth).clamp(0.0, 1.0)) * 255.0).round() as u8
        };
        Rgba([level, level, level, 255])
    })
}
