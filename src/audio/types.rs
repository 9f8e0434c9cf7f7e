//! Messages exchanged between the UI thread and the audio thread.

use std::path::PathBuf;
use std::time::Duration;

/// Tags every load so events from a superseded load can be told apart.
pub type LoadId = u64;

/// Replace whatever is loaded with `path`, starting `start` into the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub id: LoadId,
    pub path: PathBuf,
    pub start: Duration,
    /// Leave the new sink paused instead of starting it.
    pub paused: bool,
}

#[derive(Debug)]
pub enum AudioCmd {
    /// Load a track and (unless requested paused) start playing it.
    Load(LoadRequest),
    /// Pause the current sink.
    Pause,
    /// Resume the current sink.
    Resume,
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// The track decoded fine; `duration` is what the decoder reports, if anything.
    Loaded {
        id: LoadId,
        duration: Option<Duration>,
    },
    /// Playing position measured from the start offset of the load.
    Position { id: LoadId, position: Duration },
    /// The sink ran out of audio.
    Finished { id: LoadId },
    /// The track could not be opened, decoded or sent to an output device.
    Failed { id: LoadId, reason: String },
}

impl AudioEvent {
    pub fn id(&self) -> LoadId {
        match self {
            Self::Loaded { id, .. }
            | Self::Position { id, .. }
            | Self::Finished { id }
            | Self::Failed { id, .. } => *id,
        }
    }
}
