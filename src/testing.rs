//! Test doubles shared by unit tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::{ItemId, PlaybackEngine};

/// Engine calls recorded by `MockEngine`, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Load(PathBuf),
    Play,
    Pause,
    Seek(Duration),
    Observe(ItemId),
    ClearObserver,
}

#[derive(Default)]
pub(crate) struct MockEngine {
    pub calls: Vec<Call>,
    pub next_item: u64,
    pub loaded: Option<ItemId>,
    pub observer: Option<ItemId>,
    pub position: Option<Duration>,
    pub duration: Option<Duration>,
}

impl PlaybackEngine for MockEngine {
    fn load(&mut self, track: &Path) -> ItemId {
        self.next_item += 1;
        let item = ItemId(self.next_item);
        self.loaded = Some(item);
        self.calls.push(Call::Load(track.to_path_buf()));
        item
    }

    fn play(&mut self) {
        self.calls.push(Call::Play);
    }

    fn pause(&mut self) {
        self.calls.push(Call::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.calls.push(Call::Seek(position));
    }

    fn has_item(&self) -> bool {
        self.loaded.is_some()
    }

    fn current_position(&self) -> Option<Duration> {
        self.position
    }

    fn current_duration(&self) -> Option<Duration> {
        self.duration
    }

    fn observe_item_end(&mut self, item: ItemId) {
        self.observer = Some(item);
        self.calls.push(Call::Observe(item));
    }

    fn clear_item_observer(&mut self) {
        self.observer = None;
        self.calls.push(Call::ClearObserver);
    }
}
