//! The playlist book: every named playlist and its typed track descriptors.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One entry of a playlist as written in the playlist book.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackConfig {
    /// Sound file relative to the data dir. `None` makes a silent placeholder.
    #[serde(default)]
    pub file: Option<PathBuf>,
    pub name: String,
    #[serde(default = "full_volume")]
    pub volume: f32,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub fade_in_ms: u64,
    #[serde(default)]
    pub fade_out_ms: u64,
    /// Auto-advance threshold in milliseconds.
    #[serde(default)]
    pub end_ms: Option<u64>,
}

fn full_volume() -> f32 {
    1.0
}

impl TrackConfig {
    /// A silent placeholder with every option at its default.
    #[cfg(test)]
    pub fn silence(name: impl Into<String>) -> Self {
        Self {
            file: None,
            name: name.into(),
            volume: full_volume(),
            looping: false,
            fade_in_ms: 0,
            fade_out_ms: 0,
            end_ms: None,
        }
    }

    pub fn is_silent(&self) -> bool {
        self.file.is_none()
    }
}

#[derive(Debug, Error)]
pub enum PlaylistFileError {
    #[error("failed to read playlist file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON playlist file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed TOML playlist file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported playlist file format {}: expected .json or .toml", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("no playlist named {name:?} (available: {available})")]
    MissingPlaylist { name: String, available: String },
    #[error("playlist {playlist:?}, track {index} ({name:?}): {reason}")]
    InvalidTrack {
        playlist: String,
        index: usize,
        name: String,
        reason: String,
    },
}

/// Every playlist defined in one file, keyed by name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct PlaylistBook {
    playlists: BTreeMap<String, Vec<TrackConfig>>,
}

impl PlaylistBook {
    /// Read a playlist book, picking the parser from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, PlaylistFileError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let read = || {
            fs::read_to_string(path).map_err(|source| PlaylistFileError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        match ext.as_deref() {
            Some("json") => Self::from_json_str(&read()?),
            Some("toml") => Self::from_toml_str(&read()?),
            _ => Err(PlaylistFileError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, PlaylistFileError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, PlaylistFileError> {
        Ok(toml::from_str(text)?)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.playlists.keys().map(String::as_str)
    }

    /// Look up a playlist by name and validate each of its entries.
    pub fn playlist(&self, name: &str) -> Result<&[TrackConfig], PlaylistFileError> {
        let Some(tracks) = self.playlists.get(name) else {
            return Err(PlaylistFileError::MissingPlaylist {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            });
        };

        for (index, track) in tracks.iter().enumerate() {
            if let Err(reason) = validate_track(track) {
                return Err(PlaylistFileError::InvalidTrack {
                    playlist: name.to_string(),
                    index,
                    name: track.name.clone(),
                    reason,
                });
            }
        }

        Ok(tracks)
    }
}

fn validate_track(track: &TrackConfig) -> Result<(), String> {
    if !track.volume.is_finite() || !(0.0..=1.0).contains(&track.volume) {
        return Err(format!("volume {} is outside 0.0..=1.0", track.volume));
    }
    if let Some(file) = &track.file {
        if file.as_os_str().is_empty() {
            return Err("file must not be empty; use null for silence".to_string());
        }
    }
    Ok(())
}
