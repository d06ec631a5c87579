// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use depth_focus::constants::{self, sensor, timing};

#[test]
fn test_default_sensor_resolution_non_zero() {
    assert!(sensor::DEPTH_WIDTH > 0);
    assert!(sensor::DEPTH_HEIGHT > 0);
}

#[test]
fn test_synthetic_interval_faster_than_poll() {
    // The live loop should deliver several frames per stop-flag poll
    assert!(timing::SYNTHETIC_FRAME_INTERVAL < timing::STOP_POLL_INTERVAL);
}

#[test]
fn test_config_location_names() {
    assert!(!constants::CONFIG_DIR_NAME.is_empty());
    assert!(constants::CONFIG_FILE_NAME.ends_with(".json"));
}
