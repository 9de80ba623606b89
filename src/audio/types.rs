//! The playable-sound contract the timeline engine drives.
//!
//! The engine only issues fire-and-forget commands; fades run on the
//! implementation's own clock.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// How many times a sound repeats once started.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Loops {
    Once,
    Forever,
}

impl Loops {
    pub fn from_flag(looping: bool) -> Self {
        if looping { Self::Forever } else { Self::Once }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("{} contains no audio", .path.display())]
    Empty { path: PathBuf },
}

/// A sound loaded into memory and ready to be started any number of times.
pub trait Sound {
    fn set_volume(&mut self, volume: f32);
    /// Start playback from the beginning, ramping up over `fade_in`.
    fn play(&mut self, loops: Loops, fade_in: Duration);
    /// Ramp the current playback down to silence over `fade`, then stop it.
    /// Returns immediately.
    fn fade_out(&mut self, fade: Duration);
    fn length(&self) -> Duration;
}

pub trait SoundLoader {
    type Sound: Sound;

    fn load(&self, path: &Path) -> Result<Self::Sound, LoadError>;
}
