use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the library from disk.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An album path needs at least an artist and an album segment.
    #[error("not an artist/album path: {}", .0.display())]
    InvalidPath(PathBuf),
}

impl LibraryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Convert a `walkdir` failure, keeping the path it occurred on.
    pub(crate) fn from_walk(root: &std::path::Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| root.to_path_buf());
        let source = match err.into_io_error() {
            Some(e) => e,
            None => io::Error::other("filesystem loop detected"),
        };
        Self::Io { path, source }
    }
}
