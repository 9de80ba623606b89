//! Sound playback collaborator.
//!
//! This module defines the [`Sound`]/[`SoundLoader`] contract consumed by the
//! timeline engine and its `rodio` implementation.

mod fade;
mod rodio_backend;
mod types;

pub use rodio_backend::{RodioBackend, RodioSound};
pub use types::*;
