// SPDX-License-Identifier: GPL-3.0-only

//! Error types for depth tracking
//!
//! Every variant here is a precondition violation by the caller or an I/O
//! failure at the edges. Invalid depth samples (NaN) are not errors; they are
//! absorbed by [`crate::tracking::NanPolicy`].

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Tracker rejected a frame or its configuration
    Tracker(TrackerError),
    /// Coordinate remapping failed
    Remap(RemapError),
    /// Depth source failed to deliver a frame
    Source(SourceError),
    /// Configuration errors
    Config(String),
    /// Generic error with message
    Other(String),
}

/// Centroid tracker errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Frame has a zero width or height
    EmptyFrame,
    /// width * height (or its byte length) does not fit in memory
    TooLarge { width: u32, height: u32 },
    /// Sample count does not match width * height
    SizeMismatch { expected: usize, actual: usize },
    /// Frame dimensions differ from the ones established by the first frame
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// Averaging window must hold at least one frame
    InvalidWindow,
}

/// Coordinate remapping errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapError {
    /// An image dimension is zero (or not a positive finite number)
    ZeroDimension,
    /// Depth or camera resolution has not been observed yet
    ResolutionUnknown,
}

/// Depth source errors
#[derive(Debug, Clone)]
pub enum SourceError {
    /// Underlying read failed
    Io(String),
    /// Recording ended in the middle of a frame
    TruncatedFrame { expected: usize, actual: usize },
    /// Decoded samples could not form a frame
    Frame(TrackerError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Tracker(e) => write!(f, "Tracker error: {}", e),
            AppError::Remap(e) => write!(f, "Remap error: {}", e),
            AppError::Source(e) => write!(f, "Depth source error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::EmptyFrame => write!(f, "Depth frame is empty"),
            TrackerError::TooLarge { width, height } => {
                write!(f, "Depth frame size {}x{} is too large", width, height)
            }
            TrackerError::SizeMismatch { expected, actual } => write!(
                f,
                "Depth frame holds {} samples, expected {}",
                actual, expected
            ),
            TrackerError::DimensionMismatch { expected, actual } => write!(
                f,
                "Depth frame is {}x{}, session established {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            TrackerError::InvalidWindow => write!(f, "Window size must be at least one frame"),
        }
    }
}

impl fmt::Display for RemapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemapError::ZeroDimension => write!(f, "Image dimensions must be non-zero"),
            RemapError::ResolutionUnknown => write!(f, "Sensor resolution not captured yet"),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io(msg) => write!(f, "I/O error: {}", msg),
            SourceError::TruncatedFrame { expected, actual } => write!(
                f,
                "Truncated frame: got {} bytes, expected {}",
                actual, expected
            ),
            SourceError::Frame(e) => write!(f, "Invalid frame: {}", e),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for TrackerError {}
impl std::error::Error for RemapError {}
impl std::error::Error for SourceError {}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        AppError::Tracker(err)
    }
}

impl From<RemapError> for AppError {
    fn from(err: RemapError) -> Self {
        AppError::Remap(err)
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Source(err)
    }
}

impl From<TrackerError> for SourceError {
    fn from(err: TrackerError) -> Self {
        SourceError::Frame(err)
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}
