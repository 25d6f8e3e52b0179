use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use coldwave::config::LibrarySettings;
use coldwave::library::{Cover, filter_albums, list_files, placeholder_index, scan_library};
use coldwave::{EngineEvent, ItemId, PlaybackController, PlaybackEngine, PlaybackState};

/// Engine that only remembers what it was told.
#[derive(Default)]
struct RecordingEngine {
    loaded: Vec<PathBuf>,
    playing: bool,
    next_item: u64,
    observer: Option<ItemId>,
}

impl PlaybackEngine for RecordingEngine {
    fn load(&mut self, track: &Path) -> ItemId {
        self.loaded.push(track.to_path_buf());
        self.playing = false;
        self.next_item += 1;
        ItemId(self.next_item)
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, _position: Duration) {}

    fn has_item(&self) -> bool {
        !self.loaded.is_empty()
    }

    fn current_position(&self) -> Option<Duration> {
        None
    }

    fn current_duration(&self) -> Option<Duration> {
        None
    }

    fn observe_item_end(&mut self, item: ItemId) {
        self.observer = Some(item);
    }

    fn clear_item_observer(&mut self) {
        self.observer = None;
    }
}

fn write(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"not real media").unwrap();
}

#[test]
fn scan_select_and_run_off_the_end() {
    let _ = env_logger::builder().is_test(true).try_init();

    let music = tempfile::tempdir().unwrap();
    let album1 = music.path().join("ArtistA").join("Album1");
    let album2 = music.path().join("ArtistB").join("Album2");
    fs::create_dir_all(&album1).unwrap();
    fs::create_dir_all(&album2).unwrap();
    for f in ["x.mp3", "y.flac", "cover.jpg"] {
        write(&album1, f);
    }
    write(&album2, "z.m4a");

    let settings = LibrarySettings::default();
    let albums = scan_library(music.path(), &settings).unwrap();
    assert_eq!(albums.len(), 2);

    let first = albums.iter().find(|a| a.title() == "Album1").unwrap();
    let second = albums.iter().find(|a| a.title() == "Album2").unwrap();
    assert_eq!(first.artist(), "ArtistA");
    assert_eq!(second.artist(), "ArtistB");
    assert_eq!(first.cover(), &Cover::Image(album1.join("cover.jpg")));
    assert_eq!(second.cover(), &Cover::Placeholder(placeholder_index("Album2")));
    // The title hash is stable across runs, so the sleeve is too.
    assert_eq!(placeholder_index("Album2"), 0);
    assert_eq!(second.cover().placeholder_asset().as_deref(), Some("record-sleeve-0.png"));
    assert_eq!(second.cover().image_path(), None);

    // Playlist follows directory listing order and holds only audio files.
    let listed: Vec<PathBuf> = list_files(&album1, true)
        .unwrap()
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e != "jpg"))
        .collect();
    let playlist = first.playlist().unwrap();
    assert_eq!(playlist, listed);
    assert_eq!(playlist.len(), 2);
    assert_eq!(second.playlist().unwrap(), vec![album2.join("z.m4a")]);

    let mut controller = PlaybackController::new(RecordingEngine::default());
    controller.select_album(first).unwrap();
    controller.select_track(1);
    assert_eq!(controller.engine().loaded.last(), Some(&playlist[1]));
    assert!(controller.is_playing());
    assert!(controller.engine().playing);

    controller.select_track(5);
    assert!(!controller.is_playing());
    assert!(!controller.engine().playing);
    assert_eq!(controller.current_track(), Some(1));
    assert_eq!(controller.state(), PlaybackState::Paused);

    // Switch albums, then deliver a late end event for the old item.
    let stale = controller.engine().observer.unwrap();
    controller.select_album(second).unwrap();
    let before = controller.snapshot();
    controller.handle_event(EngineEvent::ItemFinished(stale));
    assert_eq!(controller.snapshot(), before);

    let current = controller.engine().observer.unwrap();
    controller.handle_event(EngineEvent::ItemFinished(current));
    assert!(!controller.is_playing());
    assert_eq!(controller.current_track(), Some(0));

    assert_eq!(filter_albums(&albums, "artistb").len(), 1);
    assert_eq!(filter_albums(&albums, "zz_no_match").len(), 0);
}
