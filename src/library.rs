//! Media catalog: enumerates audio tracks and decorative images on disk.
//!
//! Both directories are scanned once at startup and only at their top level.
//! A missing directory is reported and treated as an empty catalog.

mod display;
mod model;
mod scan;

pub use display::display_title;
pub use model::Track;
pub use scan::{pick_random, scan_images, scan_tracks};

#[cfg(test)]
mod tests;
