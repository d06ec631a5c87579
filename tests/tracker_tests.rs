// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the centroid tracker and coordinate remapping

use depth_focus::errors::{RemapError, TrackerError};
use depth_focus::tracking::{
    Centroid, CentroidTracker, DepthFrame, ImageSize, NanPolicy, Point, nearest_point, normalize,
    remap,
};
use proptest::prelude::*;

fn frame_with_min(width: u32, height: u32, index: usize) -> DepthFrame {
    let mut samples = vec![4.0; width as usize * height as usize];
    samples[index] = 0.25;
    DepthFrame::new(width, height, samples).unwrap()
}

#[test]
fn test_sixty_frame_window_end_to_end() {
    let mut tracker = CentroidTracker::new();
    let frame = frame_with_min(50, 50, 100);

    for call in 1..60 {
        assert_eq!(
            tracker.update(&frame).unwrap(),
            None,
            "No centroid expected on call {}",
            call
        );
    }
    assert_eq!(tracker.update(&frame).unwrap(), Some(Centroid::new(0, 2)));
    assert_eq!(tracker.current(), Some(Centroid::new(0, 2)));
}

#[test]
fn test_window_average_truncates() {
    let mut tracker = CentroidTracker::with_settings(3, NanPolicy::Zero).unwrap();

    // x: 1 + 2 + 2 = 5 -> 1, y: 0 + 1 + 2 = 3 -> 1
    tracker.update(&frame_with_min(10, 4, 1)).unwrap();
    tracker.update(&frame_with_min(10, 4, 12)).unwrap();
    let centroid = tracker.update(&frame_with_min(10, 4, 22)).unwrap();
    assert_eq!(centroid, Some(Centroid::new(1, 1)));
}

#[test]
fn test_next_window_starts_from_zero() {
    let mut tracker = CentroidTracker::with_settings(2, NanPolicy::Zero).unwrap();
    tracker.update(&frame_with_min(10, 10, 99)).unwrap();
    tracker.update(&frame_with_min(10, 10, 99)).unwrap();

    tracker.update(&frame_with_min(10, 10, 34)).unwrap();
    assert_eq!(tracker.state().count(), 1);
    assert_eq!(tracker.state().sum_x(), 4);
    assert_eq!(tracker.state().sum_y(), 3);

    // Second window averages only its own frames
    let centroid = tracker.update(&frame_with_min(10, 10, 34)).unwrap();
    assert_eq!(centroid, Some(Centroid::new(4, 3)));
}

#[test]
fn test_all_nan_frame_selects_first_index() {
    let frame = DepthFrame::filled(7, 5, f32::NAN).unwrap();
    assert_eq!(nearest_point(&frame, NanPolicy::Zero), Some((0, 0)));
}

#[test]
fn test_non_square_frames() {
    // Wide: 16x4, index 37 -> x 5, y 2
    let frame = frame_with_min(16, 4, 37);
    assert_eq!(nearest_point(&frame, NanPolicy::Zero), Some((5, 2)));

    // Tall: 4x16, index 37 -> x 1, y 9
    let frame = frame_with_min(4, 16, 37);
    assert_eq!(nearest_point(&frame, NanPolicy::Zero), Some((1, 9)));
}

#[test]
fn test_dimension_change_rejected() {
    let mut tracker = CentroidTracker::new();
    tracker.update(&frame_with_min(8, 6, 0)).unwrap();
    assert!(matches!(
        tracker.update(&frame_with_min(6, 8, 0)),
        Err(TrackerError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_empty_frame_rejected() {
    assert_eq!(
        DepthFrame::new(0, 0, Vec::new()),
        Err(TrackerError::EmptyFrame)
    );
}

#[test]
fn test_remap_example() {
    let p = remap(
        Point::new(10.0, 20.0),
        ImageSize::new(100.0, 100.0),
        ImageSize::new(200.0, 50.0),
    )
    .unwrap();
    assert_eq!(p, Point::new(20.0, 10.0));
}

#[test]
fn test_normalize_example() {
    let p = normalize(Point::new(50.0, 25.0), ImageSize::new(100.0, 50.0)).unwrap();
    assert_eq!(p, Point::new(0.5, 0.5));
}

#[test]
fn test_normalize_zero_size() {
    assert_eq!(
        normalize(Point::new(1.0, 1.0), ImageSize::new(100.0, 0.0)),
        Err(RemapError::ZeroDimension)
    );
}

proptest! {
    #[test]
    fn prop_nearest_point_is_global_minimum(
        (width, order) in (1u32..12, 1u32..12).prop_flat_map(|(width, height)| {
            let len = (width * height) as usize;
            // Distinct values: a permutation of 0..len scaled into meters
            (Just(width), Just((0..len).collect::<Vec<usize>>()).prop_shuffle())
        }),
    ) {
        let height = order.len() as u32 / width;
        let samples: Vec<f32> = order.iter().map(|&v| 0.5 + v as f32 * 0.01).collect();
        let min_index = order.iter().position(|&v| v == 0).unwrap();

        let frame = DepthFrame::new(width, height, samples).unwrap();
        let expected = ((min_index as u32) % width, (min_index as u32) / width);
        prop_assert_eq!(nearest_point(&frame, NanPolicy::Zero), Some(expected));
        prop_assert_eq!(nearest_point(&frame, NanPolicy::Exclude), Some(expected));
    }

    #[test]
    fn prop_remap_equal_sizes_is_identity(
        x in -1.0e6f64..1.0e6,
        y in -1.0e6f64..1.0e6,
        w in 1u32..10_000,
        h in 1u32..10_000,
    ) {
        let size = ImageSize::from_pixels(w, h);
        let p = Point::new(x, y);
        prop_assert_eq!(remap(p, size, size).unwrap(), p);
    }
}
