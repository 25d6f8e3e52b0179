use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/coldwave/config.toml` or `~/.config/coldwave/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `COLDWAVE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub audio: AudioSettings,
}

/// What a scan does when a directory below the root cannot be read.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnreadablePolicy {
    /// Fail the whole scan with the first error.
    #[default]
    #[serde(alias = "fail", alias = "fail-fast")]
    Abort,
    /// Log the error and leave that subtree out of the library.
    #[serde(alias = "ignore")]
    Skip,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Library root scanned when the caller does not pass one.
    pub root: Option<PathBuf>,
    /// File extensions treated as playable audio (case-insensitive, without dot).
    pub audio_extensions: Vec<String>,
    /// File extensions treated as cover images (case-insensitive, without dot).
    pub image_extensions: Vec<String>,
    /// Lowercase file name prefixes that mark an image as the album cover.
    pub cover_prefixes: Vec<String>,
    /// Whether symlinked artist/album folders and files are followed.
    pub follow_links: bool,
    pub on_unreadable: UnreadablePolicy,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root: None,
            audio_extensions: vec!["flac".into(), "mp3".into(), "m4a".into()],
            image_extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            cover_prefixes: vec!["cover".into(), "600x600".into()],
            follow_links: true,
            on_unreadable: UnreadablePolicy::Abort,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the progress fraction is refreshed (milliseconds).
    pub progress_interval_ms: u64,
    /// Treat a track the engine failed to play like one that ended normally.
    /// When false, a failure pauses playback instead.
    pub advance_on_error: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: 500,
            advance_on_error: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when the engine shuts down (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
        }
    }
}
