// SPDX-License-Identifier: GPL-3.0-only

//! Preview mode switching and focus / exposure point of interest
//!
//! The session alternates between a camera preview and a depth preview.
//! While in depth mode the fPOI tracker runs on incoming depth frames. On
//! the way back to camera mode focus and exposure are locked, then, if a
//! centroid is available, re-enabled in auto mode at the tracked point.

use crate::app::frame_processor::{FpoiProcessor, FpoiResult, FrameRegion};
use crate::errors::AppResult;
use crate::tracking::{Centroid, DepthFrame, ImageSize, Point, ResolutionPair};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Which sensor feeds the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PreviewMode {
    /// RGB camera preview
    #[default]
    Camera,
    /// Depth sensor preview with fPOI tracking
    Depth,
}

impl PreviewMode {
    pub fn display_name(self) -> &'static str {
        match self {
            PreviewMode::Camera => "Camera",
            PreviewMode::Depth => "Depth",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            PreviewMode::Camera => PreviewMode::Depth,
            PreviewMode::Depth => PreviewMode::Camera,
        }
    }
}

/// Focus behavior requested from the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FocusMode {
    /// Lens position held
    #[default]
    Locked,
    /// Single autofocus pass, then hold
    AutoFocus,
}

/// Exposure behavior requested from the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExposureMode {
    /// Exposure held
    #[default]
    Locked,
    /// Single auto-exposure pass, then hold
    AutoExpose,
}

/// One configuration change for the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusRequest {
    pub focus_mode: FocusMode,
    pub exposure_mode: ExposureMode,
    /// Normalized point of interest, if any
    pub point: Option<Point>,
}

impl FocusRequest {
    /// Hold focus and exposure where they are
    pub fn locked() -> Self {
        Self {
            focus_mode: FocusMode::Locked,
            exposure_mode: ExposureMode::Locked,
            point: None,
        }
    }

    /// Focus and meter once at a normalized point
    pub fn auto_at(point: Point) -> Self {
        Self {
            focus_mode: FocusMode::AutoFocus,
            exposure_mode: ExposureMode::AutoExpose,
            point: Some(point),
        }
    }
}

/// Camera-side focus and exposure control
///
/// Implementations skip whatever the device does not support.
pub trait FocusControl {
    fn apply(&mut self, request: &FocusRequest) -> AppResult<()>;
}

/// Focus control that only logs requests
#[derive(Debug, Default)]
pub struct LogFocusControl {
    applied: Vec<FocusRequest>,
}

impl LogFocusControl {
    pub fn applied(&self) -> &[FocusRequest] {
        &self.applied
    }
}

impl FocusControl for LogFocusControl {
    fn apply(&mut self, request: &FocusRequest) -> AppResult<()> {
        info!(
            focus = ?request.focus_mode,
            exposure = ?request.exposure_mode,
            point = ?request.point,
            "Focus request"
        );
        self.applied.push(*request);
        Ok(())
    }
}

/// Preview session tying the tracker, sensor resolutions and focus control
pub struct FocusSession<C> {
    mode: PreviewMode,
    processor: Arc<FpoiProcessor>,
    resolutions: ResolutionPair,
    control: C,
}

impl<C: FocusControl> FocusSession<C> {
    pub fn new(processor: Arc<FpoiProcessor>, control: C) -> Self {
        Self {
            mode: PreviewMode::default(),
            processor,
            resolutions: ResolutionPair::new(),
            control,
        }
    }

    pub fn mode(&self) -> PreviewMode {
        self.mode
    }

    pub fn processor(&self) -> &Arc<FpoiProcessor> {
        &self.processor
    }

    pub fn resolutions(&self) -> &ResolutionPair {
        &self.resolutions
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    /// Switch preview mode
    ///
    /// Entering camera mode returns the normalized point handed to focus
    /// control, if there was one.
    pub fn switch_to(&mut self, mode: PreviewMode) -> Option<Point> {
        if mode == self.mode {
            return None;
        }
        info!(from = self.mode.display_name(), to = mode.display_name(), "Switching preview");
        self.mode = mode;

        match mode {
            PreviewMode::Depth => None,
            PreviewMode::Camera => self.apply_focus_point(),
        }
    }

    pub fn toggle(&mut self) -> Option<Point> {
        self.switch_to(self.mode.toggled())
    }

    fn apply_focus_point(&mut self) -> Option<Point> {
        self.send(&FocusRequest::locked());

        let centroid = self.processor.current()?;
        let point = match self.resolutions.focus_point(centroid) {
            Ok(point) => point,
            Err(e) => {
                debug!(error = %e, "No focus point of interest yet");
                return None;
            }
        };

        self.send(&FocusRequest::auto_at(point));
        Some(point)
    }

    fn send(&mut self, request: &FocusRequest) {
        // Focus control failures leave the camera in its previous mode
        if let Err(e) = self.control.apply(request) {
            warn!(error = %e, "Failed to configure focus");
        }
    }

    /// Restart the depth session
    ///
    /// Clears the tracker and the depth resolution. The camera resolution is
    /// kept.
    pub fn reset(&mut self) {
        self.processor.reset();
        if let Some(size) = self.resolutions.clear_depth() {
            debug!(%size, "Cleared depth resolution");
        }
    }

    /// Feed a depth frame
    ///
    /// The first frame of a depth session fixes the depth resolution. Frames
    /// arriving outside depth mode are ignored.
    pub fn on_depth_frame(&mut self, frame: &DepthFrame) -> AppResult<FpoiResult> {
        if self.mode != PreviewMode::Depth {
            trace!("Ignoring depth frame outside depth preview");
            return Ok(FpoiResult {
                emitted: None,
                current: self.processor.current(),
            });
        }

        let result = self.processor.process_blocking(frame)?;

        // The tracker only takes a new frame size after it was reset
        let (width, height) = frame.dimensions();
        let size = ImageSize::from_pixels(width, height);
        if self.resolutions.depth().is_some_and(|known| known != size) {
            self.resolutions.clear_depth();
        }
        if self.resolutions.observe_depth(size)? {
            info!(width, height, "Captured depth resolution");
        }
        Ok(result)
    }

    /// Record a camera frame's size and return where the marker goes, in
    /// camera pixels
    pub fn on_camera_frame(&self, width: u32, height: u32) -> AppResult<Option<Point>> {
        if self.resolutions.observe_camera(ImageSize::from_pixels(width, height))? {
            info!(width, height, "Captured camera resolution");
        }
        Ok(self.camera_marker())
    }

    /// Marker position on the depth preview
    pub fn depth_marker(&self) -> Option<Centroid> {
        self.processor.current()
    }

    /// Marker position on the camera preview
    pub fn camera_marker(&self) -> Option<Point> {
        let centroid = self.processor.current()?;
        self.resolutions.remap_to_camera(centroid).ok()
    }

    /// Normalized marker region on the camera preview
    pub fn camera_marker_region(&self, marker_size: u32) -> Option<FrameRegion> {
        let point = self.camera_marker()?;
        let camera = self.resolutions.camera()?;
        FrameRegion::marker(point, marker_size, camera).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::tracking::{CentroidTracker, NanPolicy};

    fn session(window: usize) -> FocusSession<LogFocusControl> {
        let tracker = CentroidTracker::with_settings(window, NanPolicy::Zero).unwrap();
        FocusSession::new(Arc::new(FpoiProcessor::new(tracker)), LogFocusControl::default())
    }

    fn frame_with_min(width: u32, height: u32, x: u32, y: u32) -> DepthFrame {
        let mut samples = vec![4.0; width as usize * height as usize];
        samples[(y * width + x) as usize] = 1.0;
        DepthFrame::new(width, height, samples).unwrap()
    }

    #[test]
    fn test_toggle() {
        assert_eq!(PreviewMode::Camera.toggled(), PreviewMode::Depth);
        assert_eq!(PreviewMode::Depth.toggled(), PreviewMode::Camera);
    }

    #[test]
    fn test_depth_frames_ignored_in_camera_mode() {
        let mut session = session(1);
        let result = session.on_depth_frame(&frame_with_min(8, 8, 1, 1)).unwrap();
        assert_eq!(result.emitted, None);
        assert_eq!(session.resolutions().depth(), None);
    }

    #[test]
    fn test_return_to_camera_without_centroid_locks() {
        let mut session = session(1);
        session.switch_to(PreviewMode::Depth);
        assert_eq!(session.switch_to(PreviewMode::Camera), None);
        assert_eq!(session.control().applied(), &[FocusRequest::locked()]);
    }

    #[test]
    fn test_return_to_camera_applies_focus_point() {
        let mut session = session(2);
        session.on_camera_frame(400, 200).unwrap();
        session.toggle();

        session.on_depth_frame(&frame_with_min(40, 20, 10, 5)).unwrap();
        let result = session.on_depth_frame(&frame_with_min(40, 20, 10, 5)).unwrap();
        assert_eq!(result.emitted, Some(Centroid::new(10, 5)));

        let point = session.toggle().unwrap();
        assert_eq!(point, Point::new(0.25, 0.25));
        assert_eq!(
            session.control().applied(),
            &[FocusRequest::locked(), FocusRequest::auto_at(point)]
        );
        assert_eq!(session.camera_marker(), Some(Point::new(100.0, 50.0)));
    }

    #[test]
    fn test_processor_reset_recaptures_depth_resolution() {
        let mut session = session(1);
        session.on_camera_frame(100, 100).unwrap();
        session.switch_to(PreviewMode::Depth);
        session.on_depth_frame(&frame_with_min(10, 10, 2, 2)).unwrap();

        session.processor().reset();
        session.on_depth_frame(&frame_with_min(20, 20, 10, 10)).unwrap();

        assert_eq!(session.resolutions().depth(), Some(ImageSize::new(20.0, 20.0)));
        assert_eq!(session.switch_to(PreviewMode::Camera), Some(Point::new(0.5, 0.5)));
    }

    #[test]
    fn test_session_reset_keeps_camera_resolution() {
        let mut session = session(1);
        session.on_camera_frame(100, 50).unwrap();
        session.switch_to(PreviewMode::Depth);
        session.on_depth_frame(&frame_with_min(10, 10, 2, 2)).unwrap();

        session.reset();
        assert_eq!(session.depth_marker(), None);
        assert_eq!(session.resolutions().depth(), None);
        assert_eq!(session.resolutions().camera(), Some(ImageSize::new(100.0, 50.0)));

        session.on_depth_frame(&frame_with_min(40, 20, 10, 5)).unwrap();
        assert_eq!(session.camera_marker(), Some(Point::new(25.0, 12.5)));
    }

    #[test]
    fn test_mismatched_frame_keeps_depth_resolution() {
        let mut session = session(1);
        session.switch_to(PreviewMode::Depth);
        session.on_depth_frame(&frame_with_min(10, 10, 2, 2)).unwrap();

        assert!(session.on_depth_frame(&frame_with_min(20, 20, 2, 2)).is_err());
        assert_eq!(session.resolutions().depth(), Some(ImageSize::new(10.0, 10.0)));
    }

    #[test]
    fn test_switch_to_same_mode_is_noop() {
        let mut session = session(1);
        assert_eq!(session.switch_to(PreviewMode::Camera), None);
        assert!(session.control().applied().is_empty());
    }

    struct FailingControl;

    impl FocusControl for FailingControl {
        fn apply(&mut self, _request: &FocusRequest) -> AppResult<()> {
            Err(AppError::Other("device busy".into()))
        }
    }

    #[test]
    fn test_focus_failure_is_not_fatal() {
        let tracker = CentroidTracker::with_settings(1, NanPolicy::Zero).unwrap();
        let mut session = FocusSession::new(Arc::new(FpoiProcessor::new(tracker)), FailingControl);
        session.on_camera_frame(100, 100).unwrap();
        session.switch_to(PreviewMode::Depth);
        session.on_depth_frame(&frame_with_min(10, 10, 5, 5)).unwrap();

        assert_eq!(session.switch_to(PreviewMode::Camera), Some(Point::new(0.5, 0.5)));
    }
}
