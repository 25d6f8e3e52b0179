//! Track sequencing over one album's playlist.
//!
//! The controller owns the engine but never the library: it keeps a copy of
//! the selected album record and a snapshot of that album's playlist taken
//! at selection time.

use std::path::{Path, PathBuf};

use crate::audio::{EngineEvent, ItemId, PlaybackEngine};
use crate::library::{AlbumRecord, LibraryError, track_display_name};

/// Where the controller is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// No album selected.
    #[default]
    Idle,
    /// Album selected but no track has been started.
    Loaded,
    Playing,
    Paused,
}

/// Read-only view of the controller handed to change hooks and the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackSnapshot {
    pub state: PlaybackState,
    pub album_path: Option<PathBuf>,
    pub track_index: Option<usize>,
    pub track_path: Option<PathBuf>,
    pub is_playing: bool,
    pub progress_fraction: f64,
}

type ChangeHook = Box<dyn FnMut(&PlaybackSnapshot) + Send>;

pub struct PlaybackController<E: PlaybackEngine> {
    engine: E,
    current_album: Option<AlbumRecord>,
    playlist: Vec<PathBuf>,
    current_track: Option<usize>,
    is_playing: bool,
    progress: f64,
    /// The one item whose end advances playback.
    end_observer: Option<ItemId>,
    advance_on_error: bool,
    on_change: Option<ChangeHook>,
}

impl<E: PlaybackEngine> PlaybackController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            current_album: None,
            playlist: Vec::new(),
            current_track: None,
            is_playing: false,
            progress: 0.0,
            end_observer: None,
            advance_on_error: true,
            on_change: None,
        }
    }

    /// Whether a failed item advances like a finished one (default) or pauses.
    pub fn with_advance_on_error(mut self, advance: bool) -> Self {
        self.advance_on_error = advance;
        self
    }

    /// Call `hook` after every operation that may have changed state.
    pub fn set_on_change(&mut self, hook: impl FnMut(&PlaybackSnapshot) + Send + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn current_album(&self) -> Option<&AlbumRecord> {
        self.current_album.as_ref()
    }

    pub fn playlist(&self) -> &[PathBuf] {
        &self.playlist
    }

    pub fn current_track(&self) -> Option<usize> {
        self.current_track
    }

    pub fn current_track_path(&self) -> Option<&Path> {
        self.current_track
            .and_then(|i| self.playlist.get(i))
            .map(PathBuf::as_path)
    }

    /// File name of the current track, for display.
    pub fn current_track_name(&self) -> Option<String> {
        self.current_track_path().map(track_display_name)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Last computed `elapsed / duration`. Approximate, for display only.
    pub fn progress_fraction(&self) -> f64 {
        self.progress
    }

    pub fn state(&self) -> PlaybackState {
        if self.current_album.is_none() {
            return PlaybackState::Idle;
        }
        match self.current_track {
            None => PlaybackState::Loaded,
            Some(_) if self.is_playing => PlaybackState::Playing,
            Some(_) => PlaybackState::Paused,
        }
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state(),
            album_path: self.current_album.as_ref().map(|a| a.path().to_path_buf()),
            track_index: self.current_track,
            track_path: self.current_track_path().map(Path::to_path_buf),
            is_playing: self.is_playing,
            progress_fraction: self.progress,
        }
    }

    /// Make `album` current and start its first track.
    ///
    /// The playlist is read from disk now. If that fails, nothing changes.
    pub fn select_album(&mut self, album: &AlbumRecord) -> Result<(), LibraryError> {
        let playlist = album.playlist()?;
        log::info!(
            "selected album {} - {} ({} tracks)",
            album.artist(),
            album.title(),
            playlist.len()
        );

        self.current_album = Some(album.clone());
        self.playlist = playlist;
        // Indices into the previous playlist mean nothing here.
        self.current_track = None;
        self.select_track(0);
        Ok(())
    }

    /// Load and play `index` of the current playlist.
    ///
    /// An index outside the playlist pauses instead; there is no wraparound.
    pub fn select_track(&mut self, index: isize) {
        let in_range = usize::try_from(index)
            .ok()
            .filter(|&i| i < self.playlist.len());

        match in_range {
            Some(i) => {
                let item = self.engine.load(&self.playlist[i]);
                self.current_track = Some(i);
                self.is_playing = true;
                self.progress = 0.0;
                self.engine.play();

                self.engine.clear_item_observer();
                self.engine.observe_item_end(item);
                self.end_observer = Some(item);

                log::info!("playing track {i}: {}", self.playlist[i].display());
            }
            None => {
                log::debug!(
                    "track {index} outside playlist of {}, pausing",
                    self.playlist.len()
                );
                self.engine.pause();
                self.is_playing = false;
            }
        }

        self.notify();
    }

    /// Step forward one track. Past the end, playback pauses.
    pub fn next_track(&mut self) {
        self.select_track(self.offset_track(1));
    }

    /// Step back one track. Before the first, playback pauses.
    pub fn previous_track(&mut self) {
        self.select_track(self.offset_track(-1));
    }

    /// Move on after the current item ended. Stops at the end of the album.
    pub fn advance_on_track_end(&mut self) {
        self.select_track(self.offset_track(1));
    }

    /// Feed an engine notification in. Events for items other than the
    /// registered observer are stale and ignored.
    pub fn handle_event(&mut self, event: EngineEvent) {
        if self.end_observer != Some(event.item()) {
            log::debug!("ignoring stale engine event {event:?}");
            return;
        }
        self.end_observer = None;

        match event {
            EngineEvent::ItemFinished(item) => {
                log::debug!("{item} finished, advancing");
                self.advance_on_track_end();
            }
            EngineEvent::ItemFailed { item, reason } => {
                log::warn!("{item} failed: {reason}");
                if self.advance_on_error {
                    self.advance_on_track_end();
                } else {
                    self.pause();
                }
            }
        }
    }

    pub fn pause(&mut self) {
        self.engine.pause();
        self.is_playing = false;
        self.notify();
    }

    /// Continue the current track. Does nothing if no track is loaded.
    pub fn resume(&mut self) {
        if self.current_track.is_none() || !self.engine.has_item() {
            return;
        }
        self.engine.play();
        self.is_playing = true;
        self.notify();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Seek to `fraction` of the current item, clamped to `[0, 1]`.
    ///
    /// Does nothing without a loaded item of known duration.
    pub fn seek_to(&mut self, fraction: f64) {
        if fraction.is_nan() || !self.engine.has_item() {
            return;
        }
        let Some(duration) = self.engine.current_duration() else {
            return;
        };
        let fraction = fraction.clamp(0.0, 1.0);

        self.engine.seek(duration.mul_f64(fraction));
        self.progress = fraction;
        self.notify();
    }

    /// Recompute the progress fraction from the engine's position and duration.
    pub fn refresh_progress(&mut self) -> f64 {
        let fraction = match (self.engine.current_position(), self.engine.current_duration()) {
            (Some(pos), Some(dur)) if !dur.is_zero() => {
                (pos.as_secs_f64() / dur.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        };
        self.set_progress(fraction);
        self.progress
    }

    /// Publish a progress fraction sampled elsewhere, such as by a
    /// `ProgressTicker`. NaN is ignored; hooks fire only on change.
    pub fn set_progress(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction != self.progress {
            self.progress = fraction;
            self.notify();
        }
    }

    fn offset_track(&self, delta: isize) -> isize {
        match self.current_track {
            Some(i) => i as isize + delta,
            None if delta > 0 => 0,
            None => -1,
        }
    }

    fn notify(&mut self) {
        if self.on_change.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(hook) = self.on_change.as_mut() {
            hook(&snapshot);
        }
    }
}
