use std::path::PathBuf;
use std::time::Duration;

/// An audio file in the catalog. Two tracks are the same track when their paths match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    /// Display title derived from the file name.
    pub title: String,
    /// Length reported by the file's properties, if it could be read.
    pub duration: Option<Duration>,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}
