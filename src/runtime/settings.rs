use crate::config;

/// Settings are optional: anything unreadable or invalid falls back to the
/// defaults with a warning.
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
