use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::AudioSettings;

use super::engine::PlaybackEngine;
use super::error::AudioError;
use super::thread::run_audio_thread;
use super::types::{AudioCmd, ClockHandle, ClockInfo, EngineEvent, ItemId};

/// `PlaybackEngine` backed by a dedicated `rodio` audio thread.
///
/// Commands are queued to the thread in call order. Position and duration
/// come from a clock the thread refreshes every tick, so they trail the
/// latest command slightly.
pub struct RodioEngine {
    tx: Sender<AudioCmd>,
    clock: ClockHandle,
    next_item: u64,
    loaded: Option<ItemId>,
    settings: AudioSettings,
    join: Option<JoinHandle<()>>,
}

impl RodioEngine {
    /// Open the default output device. Engine events arrive on the returned receiver.
    pub fn open(settings: AudioSettings) -> Result<(Self, Receiver<EngineEvent>), AudioError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<EngineEvent>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), String>>(1);
        let clock: ClockHandle = Arc::new(Mutex::new(ClockInfo::default()));

        let thread_clock = Arc::clone(&clock);
        let join = thread::Builder::new()
            .name("coldwave-audio".into())
            .spawn(move || run_audio_thread(rx, events_tx, thread_clock, ready_tx))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(msg)) => {
                let _ = join.join();
                return Err(AudioError::NoOutputDevice(msg));
            }
            Err(_) => {
                let _ = join.join();
                return Err(AudioError::NoOutputDevice("audio thread exited".into()));
            }
        }
        log::info!("audio output opened");

        Ok((
            Self {
                tx,
                clock,
                next_item: 0,
                loaded: None,
                settings,
                join: Some(join),
            },
            events_rx,
        ))
    }

    /// Shared clock for readers on other threads, such as the progress ticker.
    pub fn clock_handle(&self) -> ClockHandle {
        Arc::clone(&self.clock)
    }

    /// Fade out and stop the audio thread, waiting for it to exit.
    pub fn shutdown(&mut self) {
        let Some(join) = self.join.take() else {
            return;
        };
        self.send(AudioCmd::Quit {
            fade_out: Duration::from_millis(self.settings.quit_fade_out_ms),
        });
        let _ = join.join();
        self.loaded = None;
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            log::error!("audio thread is gone; command dropped");
        }
    }

    fn clock_for_loaded(&self) -> Option<ClockInfo> {
        let loaded = self.loaded?;
        let info = self.clock.lock().ok()?;
        (info.item == Some(loaded)).then(|| info.clone())
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, track: &Path) -> ItemId {
        self.next_item += 1;
        let item = ItemId(self.next_item);
        self.send(AudioCmd::Load {
            item,
            path: track.to_path_buf(),
        });
        self.loaded = Some(item);
        item
    }

    fn play(&mut self) {
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.send(AudioCmd::Seek(position));
    }

    fn has_item(&self) -> bool {
        self.loaded.is_some()
    }

    fn current_position(&self) -> Option<Duration> {
        match self.clock_for_loaded() {
            Some(info) => Some(info.position),
            // Loaded but not yet picked up by the audio thread.
            None => self.loaded.map(|_| Duration::ZERO),
        }
    }

    fn current_duration(&self) -> Option<Duration> {
        self.clock_for_loaded().and_then(|info| info.duration)
    }

    fn observe_item_end(&mut self, item: ItemId) {
        self.send(AudioCmd::Observe(item));
    }

    fn clear_item_observer(&mut self) {
        self.send(AudioCmd::ClearObserver);
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
