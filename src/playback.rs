//! Playback controller and progress reporting.
//!
//! [`Controller`] is the single writer of [`PlaybackState`]: every user
//! action and every engine event funnels through it on the UI thread.

mod controller;
mod progress;
mod state;

pub use controller::Controller;
pub use progress::{Progress, ProgressReporter, format_mmss};
pub use state::{PlaybackState, Status};
