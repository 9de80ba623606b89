//! Per-frame render model.
//!
//! A renderer draws these and nothing else; every number in here is derived
//! from the clock at the moment `views` is called.

use crate::audio::Sound;

use super::geometry::{BarRect, FadeDirection, FadeGeometry};
use super::playlist::Playlist;
use super::track::Track;

#[derive(Debug, Clone, PartialEq)]
pub struct TrackView {
    /// Label with time suffix.
    pub label: String,
    pub playing: bool,
    /// Whether the playlist cursor is on this track.
    pub current: bool,
    /// `None` for tracks without a known duration (infinite silence).
    pub bar: Option<BarView>,
}

/// A progress bar in bar-local coordinates: x from 0, y from 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub width: f64,
    pub height: f64,
    pub filled: f64,
    pub fade_in: Option<FadeGeometry>,
    pub fade_out: Option<FadeGeometry>,
    /// Horizontal offset of the auto-end line.
    pub auto_end_marker: Option<f64>,
}

impl<S: Sound> Playlist<S> {
    /// Snapshot every track for drawing. The longest track spans
    /// `full_width`; the others are proportionally shorter.
    pub fn views(&self, full_width: f64, bar_height: f64) -> Vec<TrackView> {
        let current = self.current_index();
        self.tracks()
            .iter()
            .enumerate()
            .map(|(i, track)| TrackView {
                label: track.display_label(),
                playing: track.is_playing(),
                current: i == current,
                bar: bar_view(track, self.max_duration_ms(), full_width, bar_height),
            })
            .collect()
    }
}

fn bar_view<S: Sound>(
    track: &Track<S>,
    max_duration_ms: f64,
    full_width: f64,
    height: f64,
) -> Option<BarView> {
    let duration_ms = track.duration_ms().filter(|d| *d > 0.0)?;
    if max_duration_ms <= 0.0 {
        return None;
    }

    let width = duration_ms * full_width / max_duration_ms;

    let mut elapsed_ms = track.elapsed_ms();
    if track.looping() && elapsed_ms > duration_ms {
        elapsed_ms %= duration_ms;
    }
    let filled = (elapsed_ms * width / duration_ms).clamp(0.0, width);

    let rect = BarRect {
        x: 0.0,
        y: 0.0,
        height,
        width,
        filled,
    };

    Some(BarView {
        width,
        height,
        filled,
        fade_in: (track.fade_in_ms() > 0)
            .then(|| track.fade_geometry(&rect, FadeDirection::In))
            .flatten(),
        fade_out: (track.fade_out_ms() > 0)
            .then(|| track.fade_geometry(&rect, FadeDirection::Out))
            .flatten(),
        auto_end_marker: track
            .end_ms()
            .map(|end_ms| end_ms as f64 * width / duration_ms),
    })
}
