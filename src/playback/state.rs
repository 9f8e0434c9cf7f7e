use std::time::Duration;

use crate::audio::LoadId;

/// Where the player is in its lifecycle. Playing and paused are exclusive by construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaybackState {
    /// Index into the track list. Meaningless while the list is empty.
    pub index: usize,
    pub status: Status,
    /// Position at the most recent pause or seek, refreshed by every sample.
    pub elapsed: Duration,
    /// Track position at which the engine's current segment began.
    pub seek_base: Duration,
    /// Length of the current track; zero while unknown.
    pub total: Duration,
    /// Id of the load the engine is working on.
    pub load_id: LoadId,
    /// Why the last load failed, if it did.
    pub error: Option<String>,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.status == Status::Paused
    }

    /// Clamp a track position to `[0, total]`; unknown totals leave it untouched.
    pub fn clamp(&self, position: Duration) -> Duration {
        if self.total.is_zero() {
            position
        } else {
            position.min(self.total)
        }
    }
}
