//! Audio-related small types and handles.
//!
//! This module defines the tokens, events, commands and shared clock used
//! between the playback controller and the audio thread.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Identifies one loaded item. Every `load` hands out a fresh id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Notifications coming back from an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The observed item played to its end.
    ItemFinished(ItemId),
    /// The observed item could not be opened or decoded.
    ItemFailed { item: ItemId, reason: String },
}

impl EngineEvent {
    pub fn item(&self) -> ItemId {
        match self {
            Self::ItemFinished(item) => *item,
            Self::ItemFailed { item, .. } => *item,
        }
    }
}

#[derive(Debug)]
pub(crate) enum AudioCmd {
    /// Replace the current item with the file at `path`, paused.
    Load { item: ItemId, path: PathBuf },
    Play,
    Pause,
    /// Jump to an absolute position in the current item.
    Seek(Duration),
    /// Report the end (or failure) of `item` once.
    Observe(ItemId),
    ClearObserver,
    /// Quit the audio thread, fading out first.
    Quit { fade_out: Duration },
}

/// Position and duration of the loaded item, refreshed by the audio thread.
#[derive(Debug, Clone, Default)]
pub struct ClockInfo {
    pub item: Option<ItemId>,
    pub position: Duration,
    pub duration: Option<Duration>,
}

impl ClockInfo {
    /// `position / duration`, clamped to `[0, 1]`; `None` when unknown.
    pub fn fraction(&self) -> Option<f64> {
        self.item?;
        let duration = self.duration?;
        if duration.is_zero() {
            return None;
        }
        Some((self.position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0))
    }
}

pub type ClockHandle = Arc<Mutex<ClockInfo>>;
