//! Configuration loader and schema types.
//!
//! This module exposes the settings schema used to drive runtime behavior,
//! helpers to load it from disk, and the playlist book format.

mod load;
mod playlists;
mod schema;

pub use playlists::*;
pub use schema::*;
