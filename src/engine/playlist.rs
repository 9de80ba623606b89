use std::path::Path;

use thiserror::Error;

use crate::audio::{LoadError, Sound, SoundLoader};
use crate::clock::SharedClock;
use crate::config::TrackConfig;

use super::track::Track;

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("failed to load track {index} ({name:?}): {source}")]
    Track {
        index: usize,
        name: String,
        #[source]
        source: LoadError,
    },
}

/// An ordered, fixed set of tracks with a single cursor.
///
/// Navigation never wraps: stepping past either end stops the current
/// track and leaves the cursor where it is.
pub struct Playlist<S> {
    tracks: Vec<Track<S>>,
    current: usize,
    max_duration_ms: f64,
}

impl<S: Sound> Playlist<S> {
    /// Load every track in order. The first track that fails aborts the load.
    pub fn load<L>(
        configs: &[TrackConfig],
        loader: &L,
        data_dir: &Path,
        clock: SharedClock,
    ) -> Result<Self, PlaylistError>
    where
        L: SoundLoader<Sound = S>,
    {
        let mut tracks = Vec::with_capacity(configs.len());
        for (index, config) in configs.iter().enumerate() {
            let track = Track::new(config, loader, data_dir, clock.clone()).map_err(|source| {
                PlaylistError::Track {
                    index,
                    name: config.name.clone(),
                    source,
                }
            })?;
            log::debug!(
                "loaded track {index} {:?} ({}, volume {:.2})",
                track.name(),
                track
                    .file()
                    .map_or_else(|| "silence".to_string(), |f| f.display().to_string()),
                track.volume()
            );
            tracks.push(track);
        }

        Ok(Self::from_tracks(tracks))
    }

    pub fn from_tracks(tracks: Vec<Track<S>>) -> Self {
        let max_duration_ms = tracks
            .iter()
            .filter_map(Track::duration_ms)
            .fold(0.0, f64::max);

        Self {
            tracks,
            current: 0,
            max_duration_ms,
        }
    }

    pub fn play(&mut self) {
        if let Some(track) = self.tracks.get_mut(self.current) {
            track.play();
        }
    }

    /// Stop the current track without moving the cursor.
    pub fn stop(&mut self) {
        if let Some(track) = self.tracks.get_mut(self.current) {
            track.stop();
        }
    }

    pub fn next(&mut self) {
        self.stop();
        if self.current + 1 < self.tracks.len() {
            self.current += 1;
            log::debug!("next -> track {}", self.current);
            self.play();
        }
    }

    pub fn previous(&mut self) {
        self.stop();
        if self.current > 0 {
            self.current -= 1;
            log::debug!("previous -> track {}", self.current);
            self.play();
        }
    }

    /// Advance when the current track reached its auto-end threshold.
    /// Returns whether it did. Meant to be polled once per frame.
    pub fn check_auto_end(&mut self) -> bool {
        let due = self
            .tracks
            .get(self.current)
            .is_some_and(Track::check_auto_end);
        if due {
            log::debug!("track {} reached its auto-end", self.current);
            self.next();
        }
        due
    }

    pub fn tracks(&self) -> &[Track<S>] {
        &self.tracks
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Track<S>> {
        self.tracks.get(self.current)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Longest known duration, used to scale every bar; 0 when none is known.
    pub fn max_duration_ms(&self) -> f64 {
        self.max_duration_ms
    }
}
