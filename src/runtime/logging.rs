use std::env;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::{LoggingSettings, default_log_path};

/// Where log output ended up.
#[derive(Debug)]
pub enum LogSink {
    File(PathBuf, File),
    Discard,
}

impl LogSink {
    pub fn path(&self) -> Option<&Path> {
        match self {
            LogSink::File(path, _) => Some(path),
            LogSink::Discard => None,
        }
    }
}

/// Send `tracing` output to a file; the terminal belongs to the UI.
///
/// An unusable log file falls back to the temp dir, then to discarding
/// output. The second value describes that fallback so it can be logged
/// once the subscriber is installed. `RUST_LOG` wins over the configured
/// level.
pub fn init(settings: &LoggingSettings) -> Result<(Option<PathBuf>, Option<String>)> {
    let (sink, problem) = open_log(settings);
    let path = sink.path().map(Path::to_path_buf);
    let writer = match sink {
        LogSink::File(_, file) => BoxMakeWriter::new(Mutex::new(file)),
        LogSink::Discard => BoxMakeWriter::new(io::sink),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;

    Ok((path, problem))
}

pub fn open_log(settings: &LoggingSettings) -> (LogSink, Option<String>) {
    let wanted = settings.file.clone().unwrap_or_else(default_log_path);
    let err = match open_append(&wanted) {
        Ok(file) => return (LogSink::File(wanted, file), None),
        Err(err) => err,
    };

    let fallback = env::temp_dir().join("meowsic").join("meowsic.log");
    if fallback != wanted {
        if let Ok(file) = open_append(&fallback) {
            let problem = format!(
                "cannot write log file {} ({err}); logging to {}",
                wanted.display(),
                fallback.display()
            );
            return (LogSink::File(fallback, file), Some(problem));
        }
    }

    let problem = format!("cannot write log file {} ({err}); logging disabled", wanted.display());
    (LogSink::Discard, Some(problem))
}

fn open_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(file: PathBuf) -> LoggingSettings {
        LoggingSettings {
            file: Some(file),
            ..LoggingSettings::default()
        }
    }

    #[test]
    fn configured_file_is_used_when_writable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("meowsic.log");

        let (sink, problem) = open_log(&settings(path.clone()));
        assert_eq!(sink.path(), Some(path.as_path()));
        assert!(problem.is_none());
        assert!(path.exists());
    }

    #[test]
    fn unwritable_file_falls_back_instead_of_failing() {
        let wanted = PathBuf::from("/dev/null/x/meowsic.log");

        let (sink, problem) = open_log(&settings(wanted.clone()));
        assert_ne!(sink.path(), Some(wanted.as_path()));
        let problem = problem.unwrap();
        assert!(problem.contains("/dev/null/x/meowsic.log"), "{problem}");
    }
}
