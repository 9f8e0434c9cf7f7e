//! Application module: the owned state the UI thread drives.
//!
//! `App` bundles the playback controller, the like registry, the list cursor
//! and the decorative pictures. It is mutated only from the UI thread.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
