//! Audio module: the engine interface the playback controller drives and
//! its `rodio` implementation.
//!
//! `RodioEngine` owns a dedicated audio thread. The thread holds the output
//! stream and the sink for the loaded item, takes commands over a channel,
//! refreshes a shared clock and reports the end of the observed item as an
//! `EngineEvent`.

mod engine;
mod error;
mod player;
mod sink;
mod thread;
mod types;

pub use engine::PlaybackEngine;
pub use error::AudioError;
pub use player::RodioEngine;
pub use types::{ClockHandle, ClockInfo, EngineEvent, ItemId};
