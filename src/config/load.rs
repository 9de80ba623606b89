use std::env;
use std::path::{Path, PathBuf};

use ::config::{Config, ConfigError, Environment, File};
use thiserror::Error;

use super::schema::Settings;

const ENV_PREFIX: &str = "SOUNDCUE";
const CONFIG_PATH_VAR: &str = "SOUNDCUE_CONFIG_PATH";

/// A setting that parsed but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSetting {
    #[error("audio.fade_steps must be at least 1")]
    FadeSteps,
    #[error("ui.frame_rate must be between 1 and 240, got {0}")]
    FrameRate(u32),
    #[error("ui.bar_rows must be at least 1")]
    BarRows,
    #[error("paths.playlists_file must not be empty")]
    PlaylistsFile,
}

impl Settings {
    /// Layer struct defaults, the optional config file and `SOUNDCUE__*`
    /// environment variables, in increasing precedence.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_layers(resolve_config_path().as_deref())
    }

    fn load_layers(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut layers = Config::builder();
        if let Some(file) = file {
            layers = layers.add_source(File::from(file).required(false));
        }
        layers
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn validate(&self) -> Result<(), InvalidSetting> {
        if self.audio.fade_steps == 0 {
            return Err(InvalidSetting::FadeSteps);
        }
        if !(1..=240).contains(&self.ui.frame_rate) {
            return Err(InvalidSetting::FrameRate(self.ui.frame_rate));
        }
        if self.ui.bar_rows == 0 {
            return Err(InvalidSetting::BarRows);
        }
        if self.paths.playlists_file.as_os_str().is_empty() {
            return Err(InvalidSetting::PlaylistsFile);
        }
        Ok(())
    }
}

/// `$SOUNDCUE_CONFIG_PATH` when set, else [`default_config_path`].
pub fn resolve_config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_VAR)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

/// `$XDG_CONFIG_HOME/soundcue/config.toml`, falling back to
/// `~/.config/soundcue/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("soundcue").join("config.toml"))
}
