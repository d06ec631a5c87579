// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for depth tracking
//!
//! This module provides command-line functionality for:
//! - Replaying raw depth recordings through the tracker
//! - Tracking a synthetic target, one-shot or live on a capture thread
//! - Remapping points between sensor resolutions
//! - Inspecting the configuration

use chrono::Local;
use depth_focus::app::{
    FocusSession, FpoiProcessor, LogFocusControl, MarkerStyle, PreviewMode, depth_preview,
    draw_marker,
};
use depth_focus::backends::depth::{DepthSource, RecordingSource, SyntheticSource};
use depth_focus::constants::timing;
use depth_focus::tracking::{
    Centroid, DepthFrame, ImageSize, Point, ResolutionPair, normalize, remap,
};
use depth_focus::{AppError, Config};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;

/// Replay a raw recording, printing every emitted centroid
pub fn replay(
    config: &Config,
    file: &Path,
    size: (u32, u32),
    camera: Option<(u32, u32)>,
    overlay: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = size;
    let mut source = RecordingSource::open(file, width, height)?;
    let processor = Arc::new(FpoiProcessor::new(config.tracker()?));
    let resolutions = match camera {
        Some((cw, ch)) => Some(ResolutionPair::with_sizes(
            ImageSize::from_pixels(width, height),
            ImageSize::from_pixels(cw, ch),
        )?),
        None => None,
    };

    println!("Replaying {} ({}x{})", file.display(), width, height);
    println!(
        "Window: {} frames, NaN policy: {}",
        config.window_size,
        config.nan_policy.display_name()
    );
    println!();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let last_frame = runtime.block_on(async {
        let mut last_frame: Option<DepthFrame> = None;
        let mut index = 0usize;
        while let Some(frame) = source.next_frame()? {
            index += 1;
            let result = processor.process(frame.clone()).await?;
            if let Some(centroid) = result.emitted {
                print_centroid(index, centroid, resolutions.as_ref());
            }
            last_frame = Some(frame);
        }
        Ok::<_, AppError>(last_frame)
    })?;

    println!();
    println!("Frames: {}", source.frames_read());
    match processor.current() {
        Some(c) => println!("Final centroid: ({}, {})", c.x, c.y),
        None => println!("No complete window in recording."),
    }

    if let (Some(target), Some(frame)) = (overlay, last_frame) {
        let path = overlay_path(&target);
        let mut image = depth_preview(&frame, max_finite_depth(&frame));
        if let Some(c) = processor.current() {
            draw_marker(&mut image, Point::from(c), MarkerStyle::from(config));
        }
        image.save(&path)?;
        println!("Overlay saved: {}", path.display());
    }

    Ok(())
}

/// Track a synthetic target through a full preview session
///
/// Starts in camera mode, switches to depth mode for the tracked frames and
/// back to camera mode to apply the focus point.
pub fn synthetic(
    config: &Config,
    frames: usize,
    size: (u32, u32),
    camera: (u32, u32),
    dropout: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = size;
    let processor = Arc::new(FpoiProcessor::new(config.tracker()?));
    let mut session = FocusSession::new(processor, LogFocusControl::default());
    let mut source = SyntheticSource::new(width, height)
        .with_frame_limit(frames)
        .with_dropout_columns(dropout);

    session.on_camera_frame(camera.0, camera.1)?;
    session.switch_to(PreviewMode::Depth);

    let mut index = 0usize;
    while let Some(frame) = source.next_frame()? {
        index += 1;
        let result = session.on_depth_frame(&frame)?;
        if let Some(centroid) = result.emitted {
            print_centroid(index, centroid, Some(session.resolutions()));
        }
    }

    println!();
    match session.switch_to(PreviewMode::Camera) {
        Some(point) => {
            println!("Focus point of interest: ({:.4}, {:.4})", point.x, point.y);
            if let Some(region) = session.camera_marker_region(config.marker_size) {
                println!(
                    "Marker region: x={:.4} y={:.4} w={:.4} h={:.4}",
                    region.x, region.y, region.width, region.height
                );
            }
        }
        None => println!("No focus point (fewer than {} frames).", config.window_size),
    }

    Ok(())
}

/// Run the synthetic source paced at sensor rate on a capture thread
pub fn synthetic_live(
    config: &Config,
    frames: usize,
    size: (u32, u32),
    dropout: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = size;
    let processor = Arc::new(FpoiProcessor::new(config.tracker()?));

    println!("Tracking live... (press Ctrl+C to stop early)");

    let mut controller = processor.spawn_loop(
        "synthetic-depth",
        move || {
            Ok(SyntheticSource::new(width, height)
                .with_frame_limit(frames)
                .with_dropout_columns(dropout)
                .with_interval(timing::SYNTHETIC_FRAME_INTERVAL))
        },
        |centroid| println!("Centroid: ({}, {})", centroid.x, centroid.y),
    );

    // Set up Ctrl+C handler
    let stop_signal = controller.stop_signal();
    ctrlc::set_handler(move || {
        stop_signal.store(true, Ordering::SeqCst);
    })?;

    while controller.is_running() {
        std::thread::sleep(timing::STOP_POLL_INTERVAL);
    }
    controller.join();

    println!();
    println!("Frames processed: {}", controller.iterations());
    if let Some(c) = processor.current() {
        println!("Final centroid: ({}, {})", c.x, c.y);
    }
    Ok(())
}

/// Remap one point and print it in target pixels and normalized form
pub fn remap_point(
    point: (f64, f64),
    from: (u32, u32),
    to: (u32, u32),
) -> Result<(), Box<dyn std::error::Error>> {
    let target = ImageSize::from_pixels(to.0, to.1);
    let mapped = remap(
        Point::new(point.0, point.1),
        ImageSize::from_pixels(from.0, from.1),
        target,
    )?;
    let normalized = normalize(mapped, target)?;

    println!("Remapped:   ({:.2}, {:.2})", mapped.x, mapped.y);
    println!("Normalized: ({:.4}, {:.4})", normalized.x, normalized.y);
    Ok(())
}

/// Print the effective configuration, optionally writing defaults first
pub fn show_config(
    config: &Config,
    path: Option<&Path>,
    write_default: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if write_default {
        let path = path.ok_or("No config directory available on this platform")?;
        Config::default().save_to(path)?;
        println!("Default config written: {}", path.display());
        return Ok(());
    }

    if let Some(path) = path {
        println!("Config file: {}", path.display());
    }
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn print_centroid(index: usize, centroid: Centroid, resolutions: Option<&ResolutionPair>) {
    print!("frame {:>5}: centroid ({}, {})", index, centroid.x, centroid.y);
    if let Some(pair) = resolutions
        && let (Ok(camera), Ok(focus)) = (pair.remap_to_camera(centroid), pair.focus_point(centroid))
    {
        print!(
            " -> camera ({:.1}, {:.1}) focus ({:.4}, {:.4})",
            camera.x, camera.y, focus.x, focus.y
        );
    }
    println!();
}

/// Resolve the overlay target; directories get a timestamped file name
fn overlay_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        target.join(format!("fpoi_{}.png", timestamp))
    } else {
        target.to_path_buf()
    }
}

fn max_finite_depth(frame: &DepthFrame) -> f32 {
    frame
        .samples()
        .iter()
        .copied()
        .filter(|d| d.is_finite())
        .fold(0.0f32, f32::max)
}
