// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Number of frames averaged into one emitted centroid
pub const DEFAULT_WINDOW_SIZE: usize = 60;

/// Edge length of the square fPOI marker in pixels
pub const DEFAULT_MARKER_SIZE: u32 = 30;

/// Opaque green, RGBA
pub const DEFAULT_MARKER_COLOR: [u8; 4] = [0, 255, 0, 255];

/// Directory name under the user config dir
pub const CONFIG_DIR_NAME: &str = "depth-focus";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Native depth sensor resolution used as the CLI default
pub mod sensor {
    /// LiDAR scene depth map (landscape)
    pub const DEPTH_WIDTH: u32 = 256;
    pub const DEPTH_HEIGHT: u32 = 192;
}

/// Timing for the synthetic live source
pub mod timing {
    use super::Duration;

    /// Target frame interval (60fps depth stream)
    pub const SYNTHETIC_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

    /// How often the CLI polls the stop flag while a loop runs
    pub const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);
}

/// Application information utilities
pub mod app_info {
    /// Get the application version from build-time environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }
}
