use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio::{LoadError, Loops, Sound, SoundLoader};
use crate::clock::SharedClock;
use crate::config::TrackConfig;

use super::geometry::{
    BarRect, FadeDirection, FadeGeometry, fade_in_progress, fade_out_progress, fade_triangle,
};
use super::timefmt::{format_clock, seconds_text};

const NS_PER_MS: u64 = 1_000_000;

/// One playlist entry: a loaded sound or a silent, timed placeholder.
///
/// Timing is tracked as monotonic timestamps rather than a running counter,
/// so elapsed time is always derived from the clock and never drifts.
pub struct Track<S> {
    name: String,
    file: Option<PathBuf>,
    sound: Option<S>,
    volume: f32,
    looping: bool,
    fade_in_ms: u64,
    fade_out_ms: u64,
    end_ms: Option<u64>,
    duration_ms: Option<f64>,
    started_at: Option<u64>,
    /// Set by `stop`, cleared by `play`.
    stopped_at: Option<u64>,
    label: String,
    clock: SharedClock,
}

impl<S: Sound> Track<S> {
    /// Build a track from its descriptor, loading the sound relative to `data_dir`.
    pub fn new<L>(
        config: &TrackConfig,
        loader: &L,
        data_dir: &Path,
        clock: SharedClock,
    ) -> Result<Self, LoadError>
    where
        L: SoundLoader<Sound = S>,
    {
        let (sound, duration_ms) = match &config.file {
            Some(file) => {
                let mut sound = loader.load(&data_dir.join(file))?;
                sound.set_volume(config.volume);
                let duration_ms = sound.length().as_secs_f64() * 1000.0;
                (Some(sound), Some(duration_ms))
            }
            // Auto-ending silence gets a duration so it can show a progress bar.
            None => (None, config.end_ms.map(|ms| ms as f64)),
        };

        Ok(Self {
            name: config.name.clone(),
            file: config.file.clone(),
            sound,
            volume: config.volume,
            looping: config.looping,
            fade_in_ms: config.fade_in_ms,
            fade_out_ms: config.fade_out_ms,
            end_ms: config.end_ms,
            duration_ms,
            started_at: None,
            stopped_at: None,
            label: base_label(config),
            clock,
        })
    }

    pub fn play(&mut self) {
        self.started_at = Some(self.clock.now_ns());
        self.stopped_at = None;
        if let Some(sound) = self.sound.as_mut() {
            sound.play(
                Loops::from_flag(self.looping),
                Duration::from_millis(self.fade_in_ms),
            );
        }
    }

    /// Stop the track and start its fade-out. The audio keeps sounding for
    /// the fade duration; the timer stops now.
    pub fn stop(&mut self) {
        if !self.is_playing() {
            return;
        }
        self.stopped_at = Some(self.clock.now_ns());
        if let Some(sound) = self.sound.as_mut() {
            sound.fade_out(Duration::from_millis(self.fade_out_ms));
        }
    }

    pub fn is_playing(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn elapsed_ns(&self) -> u64 {
        match (self.started_at, self.stopped_at) {
            (None, _) => 0,
            (Some(start), None) => self.clock.now_ns().saturating_sub(start),
            (Some(start), Some(stop)) => stop.saturating_sub(start),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ns() as f64 / NS_PER_MS as f64
    }

    /// Milliseconds since the last stop, if the track has been stopped.
    fn since_stop_ms(&self) -> Option<f64> {
        self.stopped_at
            .map(|stop| self.clock.now_ns().saturating_sub(stop) as f64 / NS_PER_MS as f64)
    }

    /// True once a playing track with an auto-end threshold has reached it.
    /// Silent placeholders never auto-end, even with `end_ms` set.
    pub fn check_auto_end(&self) -> bool {
        if !self.is_playing() || self.is_silent() {
            return false;
        }
        match self.end_ms {
            Some(end_ms) => self.elapsed_ns() >= end_ms.saturating_mul(NS_PER_MS),
            None => false,
        }
    }

    /// Static part of the display text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Label with elapsed time and, when known, total duration appended.
    pub fn display_label(&self) -> String {
        let mut text = format!("{} | {}", self.label(), format_clock(self.elapsed_ms()));
        if let Some(duration_ms) = self.duration_ms {
            text.push_str(" / ");
            text.push_str(&format_clock(duration_ms));
        }
        text
    }

    /// Fade triangle for this track's bar, or `None` when the track has no
    /// such fade or no usable duration.
    pub fn fade_geometry(&self, bar: &BarRect, direction: FadeDirection) -> Option<FadeGeometry> {
        let duration_ms = self.duration_ms?;
        let (fade_ms, progress) = match direction {
            FadeDirection::In => {
                let fade_ms = self.fade_in_ms as f64;
                (fade_ms, fade_in_progress(self.elapsed_ms(), fade_ms))
            }
            FadeDirection::Out => {
                let fade_ms = self.fade_out_ms as f64;
                (fade_ms, fade_out_progress(self.since_stop_ms(), fade_ms))
            }
        };
        fade_triangle(bar, fade_ms, duration_ms, progress, direction)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn is_silent(&self) -> bool {
        self.sound.is_none()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn fade_in_ms(&self) -> u64 {
        self.fade_in_ms
    }

    pub fn fade_out_ms(&self) -> u64 {
        self.fade_out_ms
    }

    pub fn end_ms(&self) -> Option<u64> {
        self.end_ms
    }

    pub fn duration_ms(&self) -> Option<f64> {
        self.duration_ms
    }

    #[cfg(test)]
    pub(crate) fn sound(&self) -> Option<&S> {
        self.sound.as_ref()
    }
}

fn base_label(config: &TrackConfig) -> String {
    let mut label = config.name.clone();
    if config.looping {
        label.push_str(" | Looping");
    }
    if let Some(end_ms) = config.end_ms {
        label.push_str(&format!(
            " | Ends automatically after {} seconds",
            seconds_text(end_ms)
        ));
    }
    label
}
