//! Single-level directory listing and file classification.
//!
//! Everything here is stateless. Listings keep the order the filesystem
//! returns entries in; nothing is sorted.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::error::LibraryError;

/// What a library file is used for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Audio,
    Other,
}

impl FileKind {
    /// Classify `path` by the suffix of its file name, case-insensitively.
    ///
    /// A bare `.mp3` counts as audio: only the dotted suffix is compared,
    /// so dotfiles are classified like any other name.
    pub fn classify(path: &Path, settings: &LibrarySettings) -> Self {
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            return Self::Other;
        };
        let name = name.to_lowercase();

        if has_suffix(&name, &settings.audio_extensions) {
            Self::Audio
        } else if has_suffix(&name, &settings.image_extensions) {
            Self::Image
        } else {
            Self::Other
        }
    }
}

fn has_suffix(name: &str, configured: &[String]) -> bool {
    configured
        .iter()
        .map(|e| e.trim().trim_start_matches('.'))
        .filter(|e| !e.is_empty())
        .any(|e| {
            name.strip_suffix(e.to_lowercase().as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
}

/// True if `path` has one of the configured audio extensions.
pub fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    FileKind::classify(path, settings) == FileKind::Audio
}

/// True if `path` has one of the configured image extensions.
pub fn is_image_file(path: &Path, settings: &LibrarySettings) -> bool {
    FileKind::classify(path, settings) == FileKind::Image
}

/// Every direct child of `dir` that is a directory.
pub fn list_subdirectories(dir: &Path, follow_links: bool) -> Result<Vec<PathBuf>, LibraryError> {
    list_children(dir, follow_links, |ft| ft.is_dir())
}

/// Every direct child of `dir` that is a regular file.
pub fn list_files(dir: &Path, follow_links: bool) -> Result<Vec<PathBuf>, LibraryError> {
    list_children(dir, follow_links, |ft| ft.is_file())
}

fn list_children(
    dir: &Path,
    follow_links: bool,
    keep: impl Fn(&std::fs::FileType) -> bool,
) -> Result<Vec<PathBuf>, LibraryError> {
    // WalkDir yields nothing for a plain file at depth 1, so check up front.
    let meta = std::fs::metadata(dir).map_err(|e| LibraryError::io(dir, e))?;
    if !meta.is_dir() {
        return Err(LibraryError::io(
            dir,
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(follow_links);

    let mut out = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Broken symlinks and link loops are not files or directories.
            Err(e) if e.depth() > 0 => {
                log::debug!("skipping {}: {e}", e.path().unwrap_or(dir).display());
                continue;
            }
            Err(e) => return Err(LibraryError::from_walk(dir, e)),
        };
        if keep(&entry.file_type()) {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classify_matches_known_extensions_case_insensitive() {
        let settings = LibrarySettings::default();
        assert_eq!(FileKind::classify(Path::new("/m/a.mp3"), &settings), FileKind::Audio);
        assert_eq!(FileKind::classify(Path::new("/m/a.FLAC"), &settings), FileKind::Audio);
        assert_eq!(FileKind::classify(Path::new("/m/a.M4a"), &settings), FileKind::Audio);
        assert_eq!(FileKind::classify(Path::new("/m/a.JPG"), &settings), FileKind::Image);
        assert_eq!(FileKind::classify(Path::new("/m/a.jpeg"), &settings), FileKind::Image);
        assert_eq!(FileKind::classify(Path::new("/m/a.Png"), &settings), FileKind::Image);
        assert_eq!(FileKind::classify(Path::new("/m/a.ogg"), &settings), FileKind::Other);
        assert_eq!(FileKind::classify(Path::new("/m/a.txt"), &settings), FileKind::Other);
        assert_eq!(FileKind::classify(Path::new("/m/mp3"), &settings), FileKind::Other);
        assert_eq!(FileKind::classify(Path::new("/m/amp3"), &settings), FileKind::Other);
    }

    #[test]
    fn classify_counts_bare_dotted_names() {
        let settings = LibrarySettings::default();
        assert_eq!(FileKind::classify(Path::new("/m/.mp3"), &settings), FileKind::Audio);
        assert_eq!(FileKind::classify(Path::new("/m/.JPG"), &settings), FileKind::Image);
        assert_eq!(FileKind::classify(Path::new("/m/.hidden.flac"), &settings), FileKind::Audio);
        assert_eq!(FileKind::classify(Path::new("/m/mix.mp3.txt"), &settings), FileKind::Other);
    }

    #[test]
    fn configured_extensions_are_normalized() {
        let settings = LibrarySettings {
            audio_extensions: vec![" .OGG ".into(), "".into()],
            ..LibrarySettings::default()
        };
        assert!(is_audio_file(Path::new("/m/a.ogg"), &settings));
        assert!(!is_audio_file(Path::new("/m/a.mp3"), &settings));
        assert!(is_image_file(Path::new("/m/a.png"), &settings));
    }

    #[test]
    fn listings_split_files_and_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.mp3"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir_all(dir.path().join("sub").join("deeper")).unwrap();

        let subdirs = list_subdirectories(dir.path(), true).unwrap();
        assert_eq!(subdirs, vec![dir.path().join("sub")]);

        let mut files = list_files(dir.path(), true).unwrap();
        files.sort();
        assert_eq!(
            files,
            vec![dir.path().join("a.mp3"), dir.path().join("notes.txt")]
        );
    }

    #[test]
    fn listing_missing_or_non_directory_path_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            list_files(&missing, true),
            Err(LibraryError::Io { ref path, .. }) if path == &missing
        ));

        let file = dir.path().join("a.mp3");
        fs::write(&file, b"x").unwrap();
        assert!(list_subdirectories(&file, true).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlinks_are_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.mp3"), dir.path().join("stale.mp3")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("stale-dir")).unwrap();

        for follow in [true, false] {
            assert_eq!(list_files(dir.path(), follow).unwrap(), vec![dir.path().join("a.mp3")]);
            assert!(list_subdirectories(dir.path(), follow).unwrap().is_empty());
        }
    }

    #[cfg(unix)]
    #[test]
    fn followed_symlinks_list_as_their_targets() {
        let dir = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(target.path().join("real.flac"), b"x").unwrap();
        std::os::unix::fs::symlink(target.path().join("real.flac"), dir.path().join("link.flac")).unwrap();

        assert_eq!(list_files(dir.path(), true).unwrap(), vec![dir.path().join("link.flac")]);
        assert!(list_files(dir.path(), false).unwrap().is_empty());
    }
}
