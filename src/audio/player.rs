use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use super::engine::Engine;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent, LoadRequest};

/// Handle to the audio thread. Dropping it without `quit_softly` leaves the
/// thread to exit once its command channel disconnects.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    join: Option<JoinHandle<()>>,
}

impl AudioPlayer {
    /// Spawn the audio thread. Returns the command handle and the receiver
    /// the UI loop drains for playback events.
    pub fn spawn(sample_interval: Duration) -> (Self, Receiver<AudioEvent>) {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<AudioEvent>();

        let join = spawn_audio_thread(rx, event_tx, sample_interval);

        (
            Self {
                tx,
                join: Some(join),
            },
            event_rx,
        )
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    fn send_or_log(&self, cmd: AudioCmd) {
        if let Err(err) = self.send(cmd) {
            tracing::error!(cmd = ?err.0, "audio thread is gone");
        }
    }

    /// Fade out, stop the audio thread and wait for it to exit.
    pub fn quit_softly(&mut self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Some(h) = self.join.take() {
            if h.join().is_err() {
                tracing::error!("audio thread panicked");
            }
        }
    }
}

impl Engine for AudioPlayer {
    fn load(&mut self, request: LoadRequest) {
        self.send_or_log(AudioCmd::Load(request));
    }

    fn pause(&mut self) {
        self.send_or_log(AudioCmd::Pause);
    }

    fn resume(&mut self) {
        self.send_or_log(AudioCmd::Resume);
    }
}
