//! The album record: one `<artist>/<album>` folder of the library.

use std::hash::{Hash, Hasher};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::config::LibrarySettings;

use super::catalog::{FileKind, list_files};
use super::error::LibraryError;
use super::search::contains_folded;

/// Artwork shown for an album.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cover {
    /// An image file found in the album folder.
    Image(PathBuf),
    /// One of the two bundled record-sleeve images, chosen from the title.
    Placeholder(u8),
}

impl Cover {
    /// Resolved image path, if the album has real artwork.
    pub fn image_path(&self) -> Option<&Path> {
        match self {
            Self::Image(p) => Some(p),
            Self::Placeholder(_) => None,
        }
    }

    /// File name of the bundled asset for placeholder covers.
    pub fn placeholder_asset(&self) -> Option<String> {
        match self {
            Self::Image(_) => None,
            Self::Placeholder(i) => Some(format!("record-sleeve-{i}.png")),
        }
    }
}

/// One album folder of the library.
///
/// Records never change after construction; equality and hashing only
/// look at `path`.
#[derive(Debug, Clone)]
pub struct AlbumRecord {
    path: PathBuf,
    artist: String,
    title: String,
    cover: Cover,
    settings: Arc<LibrarySettings>,
}

impl AlbumRecord {
    /// Read the album folder at `path` and pick its cover.
    pub fn new(path: impl Into<PathBuf>, settings: Arc<LibrarySettings>) -> Result<Self, LibraryError> {
        let path = path.into();
        let (artist, title) = artist_and_title(&path)?;

        let files = list_files(&path, settings.follow_links)?;
        let cover = match select_cover(&files, &settings) {
            Some(image) => Cover::Image(image),
            None => Cover::Placeholder(placeholder_index(&title)),
        };

        Ok(Self {
            path,
            artist,
            title,
            cover,
            settings,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cover(&self) -> &Cover {
        &self.cover
    }

    /// Audio files currently in the album folder, in listing order.
    ///
    /// Reads the directory on every call; the folder may have changed on
    /// disk since the last scan.
    pub fn playlist(&self) -> Result<Vec<PathBuf>, LibraryError> {
        let files = list_files(&self.path, self.settings.follow_links)?;
        Ok(files
            .into_iter()
            .filter(|f| FileKind::classify(f, &self.settings) == FileKind::Audio)
            .collect())
    }

    /// True for an empty query, or when artist or title contains `query`
    /// ignoring case.
    pub fn matches_search_term(&self, query: &str) -> bool {
        query.is_empty() || contains_folded(&self.artist, query) || contains_folded(&self.title, query)
    }
}

impl PartialEq for AlbumRecord {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for AlbumRecord {}

impl Hash for AlbumRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Split `<...>/<artist>/<title>` into its two trailing segments.
pub fn artist_and_title(path: &Path) -> Result<(String, String), LibraryError> {
    let mut segments = path.components().rev().filter_map(|c| match c {
        Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
        _ => None,
    });

    match (segments.next(), segments.next()) {
        (Some(title), Some(artist)) => Ok((artist, title)),
        _ => Err(LibraryError::InvalidPath(path.to_path_buf())),
    }
}

/// Pick the cover among `files`, which must be in listing order.
///
/// A file whose lowercase name starts with a preferred prefix wins as soon as
/// it is seen. Otherwise the last image in the listing is used.
pub fn select_cover(files: &[PathBuf], settings: &LibrarySettings) -> Option<PathBuf> {
    let mut candidate: Option<&PathBuf> = None;

    for file in files {
        if FileKind::classify(file, settings) != FileKind::Image {
            continue;
        }
        candidate = Some(file);

        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if settings
            .cover_prefixes
            .iter()
            .any(|prefix| name.starts_with(&prefix.to_lowercase()))
        {
            break;
        }
    }

    candidate.cloned()
}

/// Placeholder sleeve (0 or 1) for an album without artwork.
///
/// FNV-1a over the title bytes, so the choice is stable across runs,
/// platforms and toolchains.
pub fn placeholder_index(title: &str) -> u8 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let hash = title.bytes().fold(OFFSET_BASIS, |acc, b| {
        (acc ^ u64::from(b)).wrapping_mul(PRIME)
    });
    (hash % 2) as u8
}
