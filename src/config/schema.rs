use std::path::PathBuf;

use serde::Deserialize;

/// Runtime settings for soundcue.
///
/// Read from an optional TOML file (`$SOUNDCUE_CONFIG_PATH`, else
/// `$XDG_CONFIG_HOME/soundcue/config.toml` or `~/.config/soundcue/config.toml`).
/// `SOUNDCUE__<SECTION>__<KEY>` environment variables override the file and
/// every missing key takes its default.
///
/// Playlists are not settings; they live in the playlist book under
/// `paths.data_dir`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Folder holding the playlist book and every sound file it references.
    pub data_dir: PathBuf,
    /// Playlist book file name, relative to `data_dir` unless absolute.
    pub playlists_file: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            playlists_file: PathBuf::from("config.json"),
        }
    }
}

impl PathSettings {
    /// Full path of the playlist book.
    pub fn playlists_path(&self) -> PathBuf {
        self.data_dir.join(&self.playlists_file)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Number of volume steps used for a fade-out (higher = smoother, more wakeups).
    pub fade_steps: u32,
    /// How long to keep the process alive after quitting so the last
    /// track's fade-out can finish (milliseconds). 0 exits immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            fade_steps: 20,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Frames per second; input, auto-end and redraw all run at this rate.
    pub frame_rate: u32,
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Terminal rows used by each progress bar.
    pub bar_rows: u16,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            header_text: " Sound Management Tool ".to_string(),
            bar_rows: 2,
        }
    }
}
