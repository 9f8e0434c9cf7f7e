//! Utilities for turning a file on disk into a `rodio` sink.
//!
//! Opening/decoding is split from sink creation so that a broken file is
//! reported before an output device is ever touched.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::error::AudioError;

pub(super) type FileSource = Decoder<BufReader<File>>;

/// Open and decode `path`.
pub(super) fn open_source(path: &Path) -> Result<FileSource, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Create a paused `Sink` on `stream` that starts `start_at` into `source`.
pub(super) fn create_sink_at(stream: &OutputStream, source: FileSource, start_at: Duration) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
    sink.append(source.skip_duration(start_at));
    sink.pause();
    sink
}
