//! In-process entry point for a UI: owns the album collection, the playback
//! controller and the progress ticker, and routes engine events.
//!
//! The library and the controller stay independent; the session only hands
//! album records from one to the other.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crate::audio::{EngineEvent, PlaybackEngine, RodioEngine};
use crate::config::Settings;
use crate::library::{AlbumRecord, LibraryError, ScanHandle, filter_albums, scan_library, spawn_scan};
use crate::playback::{PlaybackController, ProgressTicker};

mod error;
mod settings;

pub use error::SessionError;
pub use settings::load_settings;

pub struct Session<E: PlaybackEngine = RodioEngine> {
    settings: Settings,
    root: Option<PathBuf>,
    albums: Vec<AlbumRecord>,
    controller: PlaybackController<E>,
    events: Receiver<EngineEvent>,
    ticker: Option<ProgressTicker>,
    pending_scan: Option<ScanHandle>,
}

impl Session<RodioEngine> {
    /// Load settings and open the default audio output.
    pub fn open() -> Result<Self, SessionError> {
        Self::open_with(load_settings())
    }

    pub fn open_with(settings: Settings) -> Result<Self, SessionError> {
        let (engine, events) = RodioEngine::open(settings.audio.clone())?;
        let interval = Duration::from_millis(settings.playback.progress_interval_ms.max(1));
        let ticker = ProgressTicker::from_clock(interval, engine.clock_handle());
        Ok(Self::with_engine(settings, engine, events, Some(ticker)))
    }
}

impl<E: PlaybackEngine> Session<E> {
    /// Assemble a session around any engine and its event channel.
    pub fn with_engine(
        settings: Settings,
        engine: E,
        events: Receiver<EngineEvent>,
        ticker: Option<ProgressTicker>,
    ) -> Self {
        let controller =
            PlaybackController::new(engine).with_advance_on_error(settings.playback.advance_on_error);
        Self {
            root: settings.library.root.clone(),
            settings,
            albums: Vec::new(),
            controller,
            events,
            ticker,
            pending_scan: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Root of the last scan, or the configured root before any scan.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn albums(&self) -> &[AlbumRecord] {
        &self.albums
    }

    pub fn controller(&self) -> &PlaybackController<E> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlaybackController<E> {
        &mut self.controller
    }

    /// Scan `root` and replace the whole collection with the result.
    ///
    /// On failure the previous collection is kept.
    pub fn scan(&mut self, root: impl Into<PathBuf>) -> Result<&[AlbumRecord], SessionError> {
        let root = root.into();
        let albums = scan_library(&root, &self.settings.library)?;
        self.root = Some(root);
        self.albums = albums;
        Ok(&self.albums)
    }

    /// Scan the last used (or configured) root again.
    pub fn rescan(&mut self) -> Result<&[AlbumRecord], SessionError> {
        let root = self.root.clone().ok_or(SessionError::NoLibraryRoot)?;
        self.scan(root)
    }

    /// Start scanning `root` on a background thread. A scan already in
    /// flight is abandoned and its result discarded.
    pub fn scan_in_background(&mut self, root: impl Into<PathBuf>) {
        let root = root.into();
        log::debug!("background scan of {}", root.display());
        self.pending_scan = Some(spawn_scan(root, self.settings.library.clone()));
    }

    pub fn is_scanning(&self) -> bool {
        self.pending_scan.is_some()
    }

    /// Publish a finished background scan. Returns the new album count,
    /// the scan error, or `None` while still running.
    pub fn poll_scan(&mut self) -> Option<Result<usize, LibraryError>> {
        let handle = self.pending_scan.as_mut()?;
        let result = handle.try_take()?;
        let root = handle.root().to_path_buf();
        self.pending_scan = None;

        Some(result.map(|albums| {
            self.root = Some(root);
            self.albums = albums;
            self.albums.len()
        }))
    }

    /// Albums matching `query`, in library order.
    pub fn search(&self, query: &str) -> Vec<AlbumRecord> {
        filter_albums(&self.albums, query)
    }

    /// Deliver pending engine events to the controller. Returns how many
    /// were handled.
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.controller.handle_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::debug!("engine event channel closed");
                    break;
                }
            }
        }
        self.progress_fraction();
        handled
    }

    /// Progress of the current track, from the ticker or computed on the
    /// spot when the session runs without one. The value is also stored on
    /// the controller so snapshots and change hooks see it.
    pub fn progress_fraction(&mut self) -> f64 {
        match &self.ticker {
            Some(t) => {
                let fraction = t.fraction();
                self.controller.set_progress(fraction);
                self.controller.progress_fraction()
            }
            None => self.controller.refresh_progress(),
        }
    }

    /// Stop the progress ticker and pause playback.
    pub fn close(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.controller.pause();
    }
}
