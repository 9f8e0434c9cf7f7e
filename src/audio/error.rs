use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum AudioError {
    /// The file could not be opened.
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file was opened but is not a format the decoder understands.
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
    /// No output device could be opened.
    Output(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => write!(f, "cannot open {}: {source}", path.display()),
            Self::Decode { path, source } => {
                write!(f, "cannot decode {}: {source}", path.display())
            }
            Self::Output(msg) => write!(f, "no audio output: {msg}"),
        }
    }
}

impl std::error::Error for AudioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::Output(_) => None,
        }
    }
}
