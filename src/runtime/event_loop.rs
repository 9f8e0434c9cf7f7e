use std::io::Stdout;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{Action, App};
use crate::audio::{AudioEvent, Engine};
use crate::config;
use crate::ui::{self, Palette, Regions};

/// Main terminal event loop: drains engine events, draws, then waits up to
/// 50 ms for input. Returns `Ok(())` when the user quits.
pub fn run<E: Engine>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    palette: &Palette,
    app: &mut App<E>,
    events: &Receiver<AudioEvent>,
) -> Result<()> {
    let mut regions = Regions::default();

    while !app.should_quit {
        loop {
            match events.try_recv() {
                Ok(ev) => app.handle_audio_event(ev),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("audio thread went away");
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
        terminal.draw(|f| regions = ui::draw(f, app, &settings.ui, palette))?;

        if event::poll(Duration::from_millis(50))? {
            let action = match event::read()? {
                Event::Key(key) => key_action(key, settings.controls.scrub_seconds),
                Event::Mouse(mouse) => mouse_action(mouse, &regions),
                _ => None,
            };
            if let Some(action) = action {
                tracing::trace!(?action, "input");
                app.dispatch(action);
            }
        }
    }

    Ok(())
}

pub(crate) fn key_action(key: KeyEvent, scrub_seconds: u64) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let scrub = i64::try_from(scrub_seconds).unwrap_or(i64::MAX);
    let action = match key.code {
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::TogglePlayPause,
        KeyCode::Char('l') | KeyCode::Right => Action::Next,
        KeyCode::Char('h') | KeyCode::Left => Action::Previous,
        KeyCode::Char('L') => Action::SeekBy(scrub),
        KeyCode::Char('H') => Action::SeekBy(-scrub),
        KeyCode::Char('f') => Action::ToggleLike,
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNext,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrev,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char('r') => Action::NewCover,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

pub(crate) fn mouse_action(mouse: MouseEvent, regions: &Regions) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => regions.action_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown if regions.list.contains((mouse.column, mouse.row).into()) => {
            Some(Action::SelectNext)
        }
        MouseEventKind::ScrollUp if regions.list.contains((mouse.column, mouse.row).into()) => {
            Some(Action::SelectPrev)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, KeyModifiers};
    use ratatui::layout::Rect;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(key_action(press(KeyCode::Char(' ')), 5), Some(Action::TogglePlayPause));
        assert_eq!(key_action(press(KeyCode::Char('p')), 5), Some(Action::TogglePlayPause));
        assert_eq!(key_action(press(KeyCode::Right), 5), Some(Action::Next));
        assert_eq!(key_action(press(KeyCode::Char('h')), 5), Some(Action::Previous));
        assert_eq!(key_action(press(KeyCode::Char('f')), 5), Some(Action::ToggleLike));
        assert_eq!(key_action(press(KeyCode::Char('L')), 7), Some(Action::SeekBy(7)));
        assert_eq!(key_action(press(KeyCode::Char('H')), 7), Some(Action::SeekBy(-7)));
        assert_eq!(key_action(press(KeyCode::Enter), 5), Some(Action::PlaySelected));
        assert_eq!(key_action(press(KeyCode::Char('r')), 5), Some(Action::NewCover));
        assert_eq!(key_action(press(KeyCode::Esc), 5), Some(Action::Quit));
        assert_eq!(key_action(press(KeyCode::Char('z')), 5), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(key_action(release, 5), None);
    }

    #[test]
    fn clicks_and_scrolls_use_regions() {
        let regions = Regions {
            play: Rect::new(10, 10, 3, 1),
            list: Rect::new(0, 20, 40, 5),
            list_offset: 4,
            ..Regions::default()
        };
        assert_eq!(mouse_action(click(11, 10), &regions), Some(Action::TogglePlayPause));
        assert_eq!(mouse_action(click(3, 21), &regions), Some(Action::Select(5)));
        assert_eq!(mouse_action(click(50, 50), &regions), None);

        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..click(3, 22)
        };
        assert_eq!(mouse_action(scroll, &regions), Some(Action::SelectNext));
    }
}
