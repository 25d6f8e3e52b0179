use std::path::Path;
use std::time::Duration;

use super::types::ItemId;

/// The media engine the playback controller drives.
///
/// Engines report the end of an item through `EngineEvent`s delivered
/// out of band (for `RodioEngine`, an `mpsc` channel). Only the item
/// registered with `observe_item_end` is reported, at most once.
pub trait PlaybackEngine {
    /// Replace the current item with `track`. The new item starts paused.
    fn load(&mut self, track: &Path) -> ItemId;
    fn play(&mut self);
    fn pause(&mut self);
    /// Seek to an absolute position in the current item.
    fn seek(&mut self, position: Duration);
    /// Whether an item is loaded, playing or not.
    fn has_item(&self) -> bool;
    fn current_position(&self) -> Option<Duration>;
    fn current_duration(&self) -> Option<Duration>;
    /// Register the single end-of-item observer, replacing any previous one.
    fn observe_item_end(&mut self, item: ItemId);
    fn clear_item_observer(&mut self);
}
