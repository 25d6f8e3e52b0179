use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use crate::config::{LibrarySettings, UnreadablePolicy};

use super::catalog::list_subdirectories;
use super::error::LibraryError;
use super::model::AlbumRecord;

/// Albums below one artist folder, in listing order.
pub fn scan_artist(artist_dir: &Path, settings: &LibrarySettings) -> Result<Vec<AlbumRecord>, LibraryError> {
    let settings = Arc::new(settings.clone());
    let mut albums = Vec::new();
    scan_artist_into(artist_dir, &settings, &mut albums)?;
    Ok(albums)
}

/// Every album exactly two levels below `root`: artist folders in listing
/// order, then albums in listing order within each artist.
///
/// Entries that are not directories are skipped at both levels. An
/// unreadable folder below the root fails the scan or is left out,
/// depending on `settings.on_unreadable`.
pub fn scan_library(root: &Path, settings: &LibrarySettings) -> Result<Vec<AlbumRecord>, LibraryError> {
    let started = Instant::now();
    let settings = Arc::new(settings.clone());
    let mut albums = Vec::new();

    for artist_dir in list_subdirectories(root, settings.follow_links)? {
        log::debug!("scanning artist folder {}", artist_dir.display());
        if let Err(e) = scan_artist_into(&artist_dir, &settings, &mut albums) {
            match settings.on_unreadable {
                UnreadablePolicy::Abort => return Err(e),
                UnreadablePolicy::Skip => log::warn!("skipping {}: {e}", artist_dir.display()),
            }
        }
    }

    log::info!(
        "scanned {} albums under {} in {:?}",
        albums.len(),
        root.display(),
        started.elapsed()
    );
    Ok(albums)
}

fn scan_artist_into(
    artist_dir: &Path,
    settings: &Arc<LibrarySettings>,
    albums: &mut Vec<AlbumRecord>,
) -> Result<(), LibraryError> {
    let album_dirs = list_subdirectories(artist_dir, settings.follow_links)?;

    // Build the artist's records first so an aborted artist adds nothing.
    let mut found = Vec::with_capacity(album_dirs.len());
    for album_dir in album_dirs {
        match AlbumRecord::new(album_dir.clone(), Arc::clone(settings)) {
            Ok(album) => found.push(album),
            Err(e) => match settings.on_unreadable {
                UnreadablePolicy::Abort => return Err(e),
                UnreadablePolicy::Skip => log::warn!("skipping {}: {e}", album_dir.display()),
            },
        }
    }

    albums.append(&mut found);
    Ok(())
}

/// A library scan running on a background thread.
///
/// The collection is only handed out once the whole scan has finished.
pub struct ScanHandle {
    root: PathBuf,
    rx: Receiver<Result<Vec<AlbumRecord>, LibraryError>>,
    taken: bool,
}

impl ScanHandle {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The finished scan, or `None` while it is still running.
    ///
    /// Yields the result once; later calls return `None`.
    pub fn try_take(&mut self) -> Option<Result<Vec<AlbumRecord>, LibraryError>> {
        if self.taken {
            return None;
        }
        let result = match self.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(scan_thread_lost(&self.root)),
        };
        self.taken = true;
        Some(result)
    }

    /// Block until the scan finishes.
    pub fn wait(self) -> Result<Vec<AlbumRecord>, LibraryError> {
        if self.taken {
            return Err(LibraryError::io(
                &self.root,
                io::Error::other("scan result already taken"),
            ));
        }
        self.rx
            .recv()
            .unwrap_or_else(|_| Err(scan_thread_lost(&self.root)))
    }
}

fn scan_thread_lost(root: &Path) -> LibraryError {
    LibraryError::io(root, io::Error::other("scan thread exited without a result"))
}

/// Start `scan_library` on a background thread.
pub fn spawn_scan(root: impl Into<PathBuf>, settings: LibrarySettings) -> ScanHandle {
    let root = root.into();
    let (tx, rx) = mpsc::channel();

    let thread_root = root.clone();
    thread::spawn(move || {
        let result = scan_library(&thread_root, &settings);
        // The receiver may be gone if the caller gave up on this scan.
        let _ = tx.send(result);
    });

    ScanHandle {
        root,
        rx,
        taken: false,
    }
}
