use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};

use super::error::AudioError;
use super::sink::{create_sink_at, open_source};
use super::types::{AudioCmd, AudioEvent, LoadId, LoadRequest};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    sample_interval: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut worker = Worker::new(events);
        let mut last_sample = Instant::now();

        loop {
            let wait = sample_interval.saturating_sub(last_sample.elapsed());
            match rx.recv_timeout(wait) {
                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    worker.quit(fade_out_ms);
                    break;
                }
                Ok(cmd) => worker.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            // Commands arriving back to back must not starve the sampler.
            if last_sample.elapsed() >= sample_interval {
                worker.sample();
                last_sample = Instant::now();
            }
        }
        tracing::debug!("audio thread stopped");
    })
}

/// Opens the audio output device.
pub(super) type OpenOutput = Box<dyn FnMut() -> Result<OutputStream, AudioError>>;

/// State owned by the audio thread.
pub(super) struct Worker {
    /// Opened on first load; retried on the next load after a failure.
    stream: Option<OutputStream>,
    open_output: OpenOutput,
    sink: Option<Sink>,
    current: Option<LoadId>,
    paused: bool,
    events: Sender<AudioEvent>,
}

impl Worker {
    pub(super) fn new(events: Sender<AudioEvent>) -> Self {
        Self::with_output(events, Box::new(open_default_output))
    }

    pub(super) fn with_output(events: Sender<AudioEvent>, open_output: OpenOutput) -> Self {
        Self {
            stream: None,
            open_output,
            sink: None,
            current: None,
            paused: true,
            events,
        }
    }

    fn emit(&self, event: AudioEvent) {
        // The UI going away first is a normal shutdown order.
        let _ = self.events.send(event);
    }

    pub(super) fn handle(&mut self, cmd: AudioCmd) {
        match cmd {
            AudioCmd::Load(request) => self.load(request),
            AudioCmd::Pause => {
                if let Some(ref s) = self.sink {
                    s.pause();
                }
                self.paused = true;
            }
            AudioCmd::Resume => {
                self.paused = false;
                match self.sink {
                    Some(ref s) => s.play(),
                    None => {
                        // Nothing left to resume: the load already drained.
                        if let Some(id) = self.current {
                            self.emit(AudioEvent::Finished { id });
                        }
                    }
                }
            }
            AudioCmd::Quit { fade_out_ms } => self.quit(fade_out_ms),
        }
    }

    fn load(&mut self, request: LoadRequest) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.current = Some(request.id);
        self.paused = true;

        match self.start(&request) {
            Ok(duration) => {
                tracing::debug!(
                    path = %request.path.display(),
                    start_ms = request.start.as_millis() as u64,
                    paused = request.paused,
                    "loaded track"
                );
                self.emit(AudioEvent::Loaded {
                    id: request.id,
                    duration,
                });
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load track");
                self.emit(AudioEvent::Failed {
                    id: request.id,
                    reason: err.to_string(),
                });
            }
        }
    }

    fn start(&mut self, request: &LoadRequest) -> Result<Option<Duration>, AudioError> {
        let source = open_source(&request.path)?;
        let duration = source.total_duration();

        let stream = self.output()?;
        let sink = create_sink_at(stream, source, request.start);
        if !request.paused {
            sink.play();
        }

        self.sink = Some(sink);
        self.paused = request.paused;
        Ok(duration)
    }

    fn output(&mut self) -> Result<&OutputStream, AudioError> {
        if self.stream.is_none() {
            self.stream = Some((self.open_output)()?);
        }
        self.stream
            .as_ref()
            .ok_or_else(|| AudioError::Output("output stream unavailable".to_string()))
    }

    /// Report the playing position, or completion once the sink has drained.
    pub(super) fn sample(&mut self) {
        if self.paused {
            return;
        }
        let (Some(id), Some(sink)) = (self.current, self.sink.as_ref()) else {
            return;
        };

        if sink.empty() {
            self.sink = None;
            self.emit(AudioEvent::Finished { id });
        } else {
            let position = sink.get_pos();
            self.emit(AudioEvent::Position { id, position });
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(s) = self.sink.take() {
            if !self.paused {
                fade_out_sink(&s, fade_out_ms);
            }
            s.stop();
        }
        self.current = None;
    }
}

fn open_default_output() -> Result<OutputStream, AudioError> {
    let mut stream =
        OutputStreamBuilder::open_default_stream().map_err(|e| AudioError::Output(e.to_string()))?;
    // rodio logs to stderr when OutputStream is dropped, which would scribble
    // over the terminal UI.
    stream.log_on_drop(false);
    tracing::info!("opened default audio output");
    Ok(stream)
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
