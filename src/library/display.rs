use std::path::Path;

use super::model::AlbumRecord;

/// Label a track by its file name, falling back to the full path.
pub fn track_display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// "Artist - Title" label for an album.
pub fn album_label(album: &AlbumRecord, sep: &str) -> String {
    format!("{}{}{}", album.artist(), sep, album.title())
}
