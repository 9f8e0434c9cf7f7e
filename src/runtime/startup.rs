use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::app::{App, CoverStyle};
use crate::art::Mascot;
use crate::audio::Engine;
use crate::config;
use crate::ui::Palette;

/// The first positional argument overrides the configured music folder.
pub fn music_dir(settings: &config::Settings) -> PathBuf {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.library.music_dir.clone())
}

pub fn cover_style(settings: &config::Settings, palette: &Palette) -> CoverStyle {
    CoverStyle {
        size_px: settings.ui.cover_px,
        corner_radius: settings.ui.cover_corner_radius,
        background: palette.background_rgb(),
    }
}

/// Attach the mascot animation; a missing or broken asset only costs the
/// decoration.
pub fn load_mascot<E: Engine>(app: &mut App<E>, settings: &config::Settings, palette: &Palette) {
    let path = &settings.assets.mascot_path;
    let interval = Duration::from_millis(settings.assets.mascot_frame_ms);
    match Mascot::load(path, settings.ui.mascot_px, interval, palette.background_rgb()) {
        Ok(mascot) => {
            tracing::debug!(frames = mascot.frame_count(), "loaded mascot");
            app.set_mascot(mascot);
        }
        Err(err) => tracing::warn!("mascot unavailable: {err:#}"),
    }
}

pub fn apply_playback_defaults<E: Engine>(app: &mut App<E>, settings: &config::Settings) {
    if settings.playback.autoplay && app.has_tracks() {
        app.dispatch(crate::app::Action::TogglePlayPause);
    }
}
