use std::time::Duration;

use super::state::PlaybackState;

/// One displayable progress reading.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Progress {
    /// Share of the track already played, in `[0, 1]`.
    pub fraction: f64,
    pub elapsed: Duration,
    pub total: Duration,
}

impl Progress {
    pub fn from_state(state: &PlaybackState) -> Self {
        let elapsed = state.clamp(state.elapsed);
        let fraction = if state.total.is_zero() {
            0.0
        } else {
            (elapsed.as_secs_f64() / state.total.as_secs_f64()).clamp(0.0, 1.0)
        };
        Self {
            fraction,
            elapsed,
            total: state.total,
        }
    }

    pub fn elapsed_text(&self) -> String {
        format_mmss(self.elapsed)
    }

    pub fn total_text(&self) -> String {
        format_mmss(self.total)
    }
}

/// Turns raw engine positions into progress readings.
#[derive(Debug, Default)]
pub struct ProgressReporter {
    last: Progress,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one engine sample into `state`. Returns the new reading, or
    /// `None` when nothing is playing.
    ///
    /// `raw` is measured from the start of the engine's current segment, so
    /// the segment's offset into the track is added back before clamping.
    pub fn sample(&mut self, state: &mut PlaybackState, raw: Duration) -> Option<Progress> {
        if !state.is_playing() {
            return None;
        }
        state.elapsed = state.clamp(state.seek_base + raw);
        self.last = Progress::from_state(state);
        Some(self.last)
    }

    /// Re-read `state` after a pause, seek or track change.
    pub fn refresh(&mut self, state: &PlaybackState) -> Progress {
        self.last = Progress::from_state(state);
        self.last
    }

    pub fn last(&self) -> Progress {
        self.last
    }
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
