use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_coldwave_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("COLDWAVE_CONFIG_PATH", "/tmp/coldwave-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/coldwave-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("coldwave")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("coldwave")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_supported_formats() {
    let s = Settings::default();
    assert_eq!(s.library.audio_extensions, vec!["flac", "mp3", "m4a"]);
    assert_eq!(s.library.image_extensions, vec!["jpg", "jpeg", "png"]);
    assert_eq!(s.library.cover_prefixes, vec!["cover", "600x600"]);
    assert_eq!(s.library.on_unreadable, UnreadablePolicy::Abort);
    assert!(s.library.follow_links);
    assert_eq!(s.playback.progress_interval_ms, 500);
    assert!(s.playback.advance_on_error);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_policy_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
root = "/srv/music"
audio_extensions = ["mp3"]
image_extensions = ["png"]
cover_prefixes = ["folder"]
follow_links = false
on_unreadable = "ignore"

[playback]
progress_interval_ms = 250
advance_on_error = false

[audio]
quit_fade_out_ms = 0
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("COLDWAVE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("COLDWAVE__PLAYBACK__PROGRESS_INTERVAL_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.root, Some(std::path::PathBuf::from("/srv/music")));
    assert_eq!(s.library.audio_extensions, vec!["mp3".to_string()]);
    assert_eq!(s.library.image_extensions, vec!["png".to_string()]);
    assert_eq!(s.library.cover_prefixes, vec!["folder".to_string()]);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.on_unreadable, UnreadablePolicy::Skip);
    assert_eq!(s.playback.progress_interval_ms, 250);
    assert!(!s.playback.advance_on_error);
    assert_eq!(s.audio.quit_fade_out_ms, 0);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
progress_interval_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("COLDWAVE_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("COLDWAVE__PLAYBACK__PROGRESS_INTERVAL_MS", "1000");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.progress_interval_ms, 1000);
}

#[test]
fn validate_rejects_zero_interval_and_empty_prefix() {
    let mut s = Settings::default();
    s.playback.progress_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.cover_prefixes.push(String::new());
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.library.audio_extensions = vec!["  ".into()];
    assert!(s.validate().is_err());
}
