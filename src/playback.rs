//! Playback module: the track-sequencing state machine and the periodic
//! progress sampler.

mod controller;
mod progress;

pub use controller::{PlaybackController, PlaybackSnapshot, PlaybackState};
pub use progress::{ProgressHandle, ProgressTicker};
