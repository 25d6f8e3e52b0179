use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),

    #[error("failed to start audio thread: {0}")]
    ThreadSpawn(#[from] io::Error),
}
