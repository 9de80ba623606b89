//! Playback and timeline engine.
//!
//! [`Track`] owns per-entry timing and fade state, [`Playlist`] owns the
//! cursor and sequencing, and [`TrackView`] is what gets handed to the
//! renderer each frame. Nothing here draws or touches the terminal; sound
//! output goes through the [`crate::audio::Sound`] contract.

mod geometry;
mod playlist;
mod timefmt;
mod track;
mod view;

pub use geometry::{BarRect, FadeDirection, FadeGeometry, Point};
pub use playlist::{Playlist, PlaylistError};
pub use track::Track;
pub use view::{BarView, TrackView};

#[cfg(test)]
mod tests;
