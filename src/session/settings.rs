use crate::config;

/// Load settings, falling back to defaults when the file is unreadable or invalid.
///
/// Configuration is optional; a bad config file must not keep the player from
/// starting.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                log::warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            log::warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
