use std::io;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioEvent, AudioPlayer};
use crate::config;
use crate::library::{scan_images, scan_tracks};
use crate::playback::Controller;
use crate::ui::Palette;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<()> {
    let (settings, problem) = settings::load_settings();
    let (log_path, log_problem) = logging::init(&settings.logging)?;
    match log_path {
        Some(path) => tracing::info!(log = %path.display(), "meowsic starting"),
        None => tracing::info!("meowsic starting"),
    }
    for problem in [problem, log_problem].into_iter().flatten() {
        tracing::warn!("{problem}");
    }

    let music_dir = startup::music_dir(&settings);
    let tracks = scan_tracks(&music_dir, &settings.library, settings.ui.title_max_chars);
    let images = scan_images(&settings.library.image_dir, &settings.library);
    tracing::info!(tracks = tracks.len(), images = images.len(), dir = %music_dir.display(), "catalog scanned");

    let palette = Palette::from_theme(&settings.ui.theme);
    let sample_interval = Duration::from_millis(settings.playback.sample_interval_ms);
    let (audio_player, events) = AudioPlayer::spawn(sample_interval);

    let controller = Controller::new(tracks, audio_player);
    let mut app = App::new(
        controller,
        music_dir,
        images,
        startup::cover_style(&settings, &palette),
    );
    startup::load_mascot(&mut app, &settings, &palette);
    startup::apply_playback_defaults(&mut app, &settings);

    let ui_result = run_ui(&settings, &palette, &mut app, &events);

    app.controller
        .engine_mut()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    tracing::info!("meowsic stopped");

    ui_result
}

fn run_ui(
    settings: &config::Settings,
    palette: &Palette,
    app: &mut App<AudioPlayer>,
    events: &Receiver<AudioEvent>,
) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
    event_loop::run(&mut terminal, settings, palette, app, events)
}

/// Raw mode plus alternate screen; restored on drop, including after a
/// partial setup.
struct TerminalGuard<R: FnMut()> {
    restore: R,
}

impl TerminalGuard<fn()> {
    fn enter() -> Result<Self> {
        Self::enter_with(
            enable_raw_mode,
            || execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture),
            restore_terminal,
        )
    }
}

impl<R: FnMut()> TerminalGuard<R> {
    fn enter_with(
        enable_raw: impl FnOnce() -> io::Result<()>,
        setup_screen: impl FnOnce() -> io::Result<()>,
        restore: R,
    ) -> Result<Self> {
        enable_raw().context("failed to enable raw mode")?;
        let guard = TerminalGuard { restore };
        setup_screen().context("failed to set up terminal")?;
        Ok(guard)
    }
}

impl<R: FnMut()> Drop for TerminalGuard<R> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(%err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show) {
        tracing::warn!(%err, "failed to restore terminal");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn broken() -> io::Result<()> {
        Err(io::Error::other("not a tty"))
    }

    #[test]
    fn failed_screen_setup_still_restores_the_terminal() {
        let restored = Cell::new(0);
        let result = TerminalGuard::enter_with(|| Ok(()), broken, || restored.set(restored.get() + 1));

        let err = result.err().unwrap();
        assert!(format!("{err:#}").contains("not a tty"));
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn nothing_to_restore_when_raw_mode_fails() {
        let restored = Cell::new(0);
        let result = TerminalGuard::enter_with(broken, || Ok(()), || restored.set(restored.get() + 1));

        assert!(result.is_err());
        assert_eq!(restored.get(), 0);
    }

    #[test]
    fn guard_restores_once_on_drop() {
        let restored = Cell::new(0);
        let guard = TerminalGuard::enter_with(|| Ok(()), || Ok(()), || restored.set(restored.get() + 1)).unwrap();
        assert_eq!(restored.get(), 0);

        drop(guard);
        assert_eq!(restored.get(), 1);
    }
}
