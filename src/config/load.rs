use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` layers struct defaults, an optional config file and
/// environment variables (prefix `COLDWAVE__`), highest last.
impl Settings {
    /// Load settings from an optional config file and the environment.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            log::debug!("reading config from {}", path.display());
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("COLDWAVE")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("library.audio_extensions")
                .with_list_parse_key("library.image_extensions")
                .with_list_parse_key("library.cover_prefixes")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.library.audio_extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("library.audio_extensions must name at least one extension".to_string());
        }
        if self.library.cover_prefixes.iter().any(|p| p.is_empty()) {
            return Err("library.cover_prefixes must not contain empty prefixes".to_string());
        }
        if self.playback.progress_interval_ms == 0 {
            return Err("playback.progress_interval_ms must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `COLDWAVE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("COLDWAVE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/coldwave/config.toml`
/// or `~/.config/coldwave/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("coldwave").join("config.toml"))
}
