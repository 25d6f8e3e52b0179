use thiserror::Error;

use crate::audio::AudioError;
use crate::library::LibraryError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    /// Rescan requested before any root was scanned or configured.
    #[error("no library root configured")]
    NoLibraryRoot,
}
