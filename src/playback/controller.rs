use std::time::Duration;

use crate::audio::{AudioEvent, Engine, LoadRequest};
use crate::library::Track;

use super::progress::{Progress, ProgressReporter};
use super::state::{PlaybackState, Status};

/// Owns the track list and the playback state, and is the only thing that
/// talks to the engine.
pub struct Controller<E: Engine> {
    tracks: Vec<Track>,
    engine: E,
    state: PlaybackState,
    reporter: ProgressReporter,
    /// Number of tracks started from the top so far.
    starts: u64,
}

impl<E: Engine> Controller<E> {
    pub fn new(tracks: Vec<Track>, engine: E) -> Self {
        if tracks.is_empty() {
            tracing::warn!("no tracks found; playback controls are disabled");
        }
        let state = PlaybackState {
            total: tracks
                .first()
                .and_then(|t| t.duration)
                .unwrap_or_default(),
            ..PlaybackState::default()
        };
        let mut reporter = ProgressReporter::new();
        reporter.refresh(&state);

        Self {
            tracks,
            engine,
            state,
            reporter,
            starts: 0,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn progress(&self) -> Progress {
        self.reporter.last()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// How many times a track has been started from the beginning.
    pub fn starts(&self) -> u64 {
        self.starts
    }

    /// The track under the play head, if there is one.
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.state.index)
    }

    /// The track to show as "now playing": nothing until the first start.
    pub fn now_playing(&self) -> Option<&Track> {
        if self.starts == 0 && self.state.status == Status::Stopped {
            None
        } else {
            self.current_track()
        }
    }

    /// Play from stopped, resume from paused, pause while playing.
    pub fn toggle_play_pause(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        match self.state.status {
            Status::Playing => {
                self.engine.pause();
                self.state.status = Status::Paused;
                self.state.elapsed = self.state.clamp(self.state.elapsed);
                self.reporter.refresh(&self.state);
                tracing::debug!(elapsed_ms = self.state.elapsed.as_millis() as u64, "paused");
            }
            Status::Paused => {
                self.engine.resume();
                self.state.status = Status::Playing;
                tracing::debug!("resumed");
            }
            Status::Stopped => self.start(self.state.index),
        }
    }

    pub fn next(&mut self) {
        let n = self.tracks.len();
        if n == 0 {
            return;
        }
        self.start((self.state.index + 1) % n);
    }

    pub fn previous(&mut self) {
        let n = self.tracks.len();
        if n == 0 {
            return;
        }
        self.start((self.state.index + n - 1) % n);
    }

    /// Start the track at `index`; out-of-range indices are ignored.
    pub fn play_index(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.start(index);
        }
    }

    /// Jump to `fraction` (clamped to `[0, 1]`) of the current track. A
    /// controller that was not playing stays silent at the new position.
    pub fn seek(&mut self, fraction: f64) {
        if self.tracks.is_empty() || self.state.total.is_zero() {
            return;
        }
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.seek_to(self.state.total.mul_f64(fraction));
    }

    /// Move the play head by `delta_secs` relative to the current position.
    pub fn seek_by(&mut self, delta_secs: i64) {
        if self.tracks.is_empty() || self.state.status == Status::Stopped {
            return;
        }
        let delta = Duration::from_secs(delta_secs.unsigned_abs());
        let target = if delta_secs >= 0 {
            self.state.elapsed + delta
        } else {
            self.state.elapsed.saturating_sub(delta)
        };
        self.seek_to(target);
    }

    /// The engine drained the current track while it was playing.
    pub fn on_track_ended(&mut self) {
        if self.state.is_playing() {
            tracing::debug!("track ended");
            self.next();
        }
    }

    /// The engine could not play the current track. Playback stops on it
    /// rather than skipping ahead.
    pub fn on_track_failed(&mut self, reason: String) {
        tracing::warn!(
            track = ?self.current_track().map(|t| &t.path),
            %reason,
            "playback failed"
        );
        self.state.status = Status::Stopped;
        self.state.elapsed = Duration::ZERO;
        self.state.seek_base = Duration::ZERO;
        self.state.error = Some(reason);
        self.reporter.refresh(&self.state);
    }

    /// Route one engine event. Returns a fresh progress reading when the
    /// event was a position sample taken while playing.
    pub fn handle_event(&mut self, event: AudioEvent) -> Option<Progress> {
        if event.id() != self.state.load_id {
            tracing::trace!(?event, current = self.state.load_id, "dropping stale event");
            return None;
        }
        match event {
            AudioEvent::Loaded { duration, .. } => {
                if self.state.total.is_zero() {
                    if let Some(d) = duration {
                        self.state.total = d;
                        self.reporter.refresh(&self.state);
                    }
                }
                None
            }
            AudioEvent::Position { position, .. } => {
                self.reporter.sample(&mut self.state, position)
            }
            AudioEvent::Finished { .. } => {
                self.on_track_ended();
                None
            }
            AudioEvent::Failed { reason, .. } => {
                self.on_track_failed(reason);
                None
            }
        }
    }

    fn start(&mut self, index: usize) {
        let Some(track) = self.tracks.get(index) else {
            return;
        };
        tracing::info!(track = %track.path.display(), "starting track");
        self.state.total = track.duration.unwrap_or_default();
        self.state.index = index;
        self.state.status = Status::Playing;
        self.state.elapsed = Duration::ZERO;
        self.state.seek_base = Duration::ZERO;
        self.state.error = None;
        self.starts += 1;

        self.issue_load(Duration::ZERO, false);
        self.reporter.refresh(&self.state);
    }

    fn seek_to(&mut self, target: Duration) {
        let target = self.state.clamp(target);
        let keep_paused = !self.state.is_playing();

        self.state.status = if keep_paused {
            Status::Paused
        } else {
            Status::Playing
        };
        self.state.elapsed = target;
        self.state.seek_base = target;
        self.state.error = None;

        tracing::debug!(target_ms = target.as_millis() as u64, keep_paused, "seek");
        self.issue_load(target, keep_paused);
        self.reporter.refresh(&self.state);
    }

    fn issue_load(&mut self, start: Duration, paused: bool) {
        let Some(track) = self.tracks.get(self.state.index) else {
            return;
        };
        self.state.load_id += 1;
        let request = LoadRequest {
            id: self.state.load_id,
            path: track.path.clone(),
            start,
            paused,
        };
        self.engine.load(request);
    }
}
