//! Album-folder music library and sequential playback.
//!
//! A library is a directory tree laid out as `<root>/<artist>/<album>/`.
//! [`library::scan_library`] turns it into [`AlbumRecord`]s, each with a
//! cover and an on-demand playlist of its audio files.
//! [`PlaybackController`] plays one album's tracks in order on top of a
//! [`PlaybackEngine`], advancing when the engine reports the end of the
//! observed item and stopping at the end of the album.
//!
//! [`Session`] wires these together with the `rodio` engine for a UI.

pub mod audio;
pub mod config;
pub mod library;
pub mod playback;
pub mod session;

#[cfg(test)]
mod testing;

pub use audio::{EngineEvent, ItemId, PlaybackEngine, RodioEngine};
pub use config::Settings;
pub use library::{AlbumRecord, Cover, LibraryError, filter_albums, scan_library};
pub use playback::{PlaybackController, PlaybackSnapshot, PlaybackState, ProgressTicker};
pub use session::{Session, SessionError};
