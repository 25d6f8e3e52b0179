use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::audio::ClockHandle;

pub type ProgressHandle = Arc<Mutex<f64>>;

/// Repeating timer that samples playback progress on its own thread.
///
/// The probe only reads engine state; it must not drive the controller.
/// Cancelled explicitly or when dropped.
pub struct ProgressTicker {
    stop: Arc<AtomicBool>,
    progress: ProgressHandle,
    join: Option<JoinHandle<()>>,
}

impl ProgressTicker {
    /// Call `probe` every `interval` and publish what it returns, clamped to
    /// `[0, 1]`. A `None` sample keeps the previous value.
    pub fn spawn<F>(interval: Duration, probe: F) -> Self
    where
        F: Fn() -> Option<f64> + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let progress: ProgressHandle = Arc::new(Mutex::new(0.0));

        let thread_stop = Arc::clone(&stop);
        let thread_progress = Arc::clone(&progress);
        let join = thread::spawn(move || {
            while !thread_stop.load(Ordering::Acquire) {
                if let Some(fraction) = probe() {
                    if let Ok(mut p) = thread_progress.lock() {
                        *p = fraction.clamp(0.0, 1.0);
                    }
                }
                thread::park_timeout(interval);
            }
        });

        Self {
            stop,
            progress,
            join: Some(join),
        }
    }

    /// Ticker fed from an engine's shared clock.
    pub fn from_clock(interval: Duration, clock: ClockHandle) -> Self {
        Self::spawn(interval, move || clock.lock().ok().and_then(|info| info.fraction()))
    }

    pub fn handle(&self) -> ProgressHandle {
        Arc::clone(&self.progress)
    }

    /// Most recently published fraction.
    pub fn fraction(&self) -> f64 {
        self.progress.lock().map(|p| *p).unwrap_or(0.0)
    }

    pub fn is_running(&self) -> bool {
        self.join.is_some()
    }

    /// Stop the timer and wait for its thread.
    pub fn cancel(&mut self) {
        let Some(join) = self.join.take() else {
            return;
        };
        self.stop.store(true, Ordering::Release);
        join.thread().unpark();
        let _ = join.join();
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
