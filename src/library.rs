//! Library module: walks an `<artist>/<album>` folder tree into album records.
//!
//! Submodules:
//! - `catalog`: one-level directory listings and extension classification
//! - `model`: `AlbumRecord`, cover selection and playlists
//! - `scan`: the two-level library walk
//! - `search`: query matching over artist and title

mod catalog;
mod display;
mod error;
mod model;
mod scan;
mod search;

pub use catalog::{FileKind, is_audio_file, is_image_file, list_files, list_subdirectories};
pub use display::{album_label, track_display_name};
pub use error::LibraryError;
pub use model::{AlbumRecord, Cover, artist_and_title, placeholder_index, select_cover};
pub use scan::{ScanHandle, scan_artist, scan_library, spawn_scan};
pub use search::{filter_albums, filter_indices};
