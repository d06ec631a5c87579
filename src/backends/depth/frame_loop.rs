// SPDX-License-Identifier: GPL-3.0-only
//! Thread lifecycle for depth capture loops
//!
//! A depth source is pulled on its own thread so the caller's thread (UI,
//! CLI) keeps running. The loop stops when its body asks to, when the
//! controller is stopped, or when the controller is dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Action returned by the loop body to control loop behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Pull the next frame
    Continue,
    /// Stop the loop gracefully
    Stop,
}

/// Controller for a capture loop running in a separate thread
///
/// # Example
///
/// ```ignore
/// let mut controller = CaptureLoopController::start_with_init(
///     "depth-replay",
///     move || RecordingSource::open(&path, 256, 192).map_err(|e| e.to_string()),
///     move |source| match source.next_frame() {
///         Ok(Some(frame)) => {
///             handle(frame);
///             LoopAction::Continue
///         }
///         _ => LoopAction::Stop,
///     },
/// );
///
/// controller.stop();
/// ```
pub struct CaptureLoopController {
    thread_handle: Option<JoinHandle<()>>,
    stop_signal: Arc<AtomicBool>,
    iterations: Arc<AtomicUsize>,
    name: String,
}

impl CaptureLoopController {
    /// Start a loop whose body needs no per-thread state
    pub fn start<F>(name: &str, mut loop_fn: F) -> Self
    where
        F: FnMut() -> LoopAction + Send + 'static,
    {
        Self::start_with_init(name, || Ok(()), move |_: &mut ()| loop_fn())
    }

    /// Start a loop that first builds its state on the loop thread
    ///
    /// If `init_fn` fails the thread logs the error and exits without
    /// running the body.
    pub fn start_with_init<S, I, F>(name: &str, init_fn: I, mut loop_fn: F) -> Self
    where
        S: 'static,
        I: FnOnce() -> Result<S, String> + Send + 'static,
        F: FnMut(&mut S) -> LoopAction + Send + 'static,
    {
        let stop_signal = Arc::new(AtomicBool::new(false));
        let iterations = Arc::new(AtomicUsize::new(0));
        let thread_stop = Arc::clone(&stop_signal);
        let thread_iterations = Arc::clone(&iterations);
        let thread_name = name.to_string();

        info!(name = %name, "Starting capture loop");

        let thread_handle = thread::spawn(move || {
            let mut state = match init_fn() {
                Ok(s) => s,
                Err(e) => {
                    warn!(name = %thread_name, error = %e, "Capture loop initialization failed");
                    return;
                }
            };

            while !thread_stop.load(Ordering::SeqCst) {
                let action = loop_fn(&mut state);
                thread_iterations.fetch_add(1, Ordering::Relaxed);
                if action == LoopAction::Stop {
                    debug!(name = %thread_name, "Loop requested stop");
                    break;
                }
            }

            info!(
                name = %thread_name,
                iterations = thread_iterations.load(Ordering::Relaxed),
                "Capture loop thread exiting"
            );
        });

        Self {
            thread_handle: Some(thread_handle),
            stop_signal,
            iterations,
            name: name.to_string(),
        }
    }

    /// Check if the loop thread is still running
    pub fn is_running(&self) -> bool {
        self.thread_handle
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Number of completed loop iterations
    pub fn iterations(&self) -> usize {
        self.iterations.load(Ordering::Relaxed)
    }

    /// Shared stop flag, e.g. for a Ctrl+C handler
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_signal)
    }

    /// Signal the loop to stop without waiting
    pub fn request_stop(&self) {
        debug!(name = %self.name, "Requesting capture loop stop");
        self.stop_signal.store(true, Ordering::SeqCst);
    }

    /// Stop the loop and wait for the thread to finish
    pub fn stop(&mut self) {
        self.request_stop();
        self.join();
    }

    /// Wait for the thread to finish without sending the stop signal
    pub fn join(&mut self) {
        if let Some(handle) = self.thread_handle.take()
            && let Err(e) = handle.join()
        {
            warn!(name = %self.name, "Capture loop thread panicked: {:?}", e);
        }
    }
}

impl Drop for CaptureLoopController {
    fn drop(&mut self) {
        if self.thread_handle.is_some() {
            debug!(name = %self.name, "CaptureLoopController dropped, stopping loop");
            self.stop();
        }
    }
}
