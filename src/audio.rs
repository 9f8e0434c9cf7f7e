//! Audio engine: a dedicated thread owning the `rodio` output.
//!
//! The UI side talks to it through [`AudioPlayer`] (commands in) and a
//! receiver of [`AudioEvent`]s (positions, completion and failures out).
//! The [`Engine`] trait is the seam the playback controller drives.

mod engine;
mod error;
mod player;
mod sink;
mod thread;
mod types;

pub use engine::Engine;
pub use error::AudioError;
pub use player::AudioPlayer;
pub use types::{AudioCmd, AudioEvent, LoadId, LoadRequest};

#[cfg(test)]
pub(crate) mod fake;
