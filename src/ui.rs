//! UI rendering helpers for the terminal user interface.
//!
//! Everything is drawn into a fixed-size panel centred in the terminal.
//! `draw` reports where the clickable parts ended up so mouse input can be
//! mapped back to actions.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{Action, App};
use crate::art::{Art, hex_rgb};
use crate::audio::Engine;
use crate::config::{IconSettings, ThemeSettings, UiSettings};


/// Theme colours, parsed once from settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub bar_background: Color,
    pub bar_fill: Color,
    pub indicator: Color,
}

impl Palette {
    /// Unparseable entries fall back to the built-in theme.
    pub fn from_theme(theme: &ThemeSettings) -> Self {
        let defaults = ThemeSettings::default();
        let pick = |value: &str, fallback: &str| {
            let [r, g, b] = hex_rgb(value).or_else(|| hex_rgb(fallback)).unwrap_or([0, 0, 0]);
            Color::Rgb(r, g, b)
        };
        Self {
            background: pick(&theme.background, &defaults.background),
            text: pick(&theme.text, &defaults.text),
            bar_background: pick(&theme.bar_background, &defaults.bar_background),
            bar_fill: pick(&theme.bar_fill, &defaults.bar_fill),
            indicator: pick(&theme.indicator, &defaults.indicator),
        }
    }

    /// The panel background as raw RGB, for compositing pictures onto it.
    pub fn background_rgb(&self) -> [u8; 3] {
        match self.background {
            Color::Rgb(r, g, b) => [r, g, b],
            _ => [0, 0, 0],
        }
    }
}

/// Screen areas of the clickable widgets from the last draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Regions {
    pub panel: Rect,
    pub progress: Rect,
    pub prev: Rect,
    pub play: Rect,
    pub next: Rect,
    pub like: Rect,
    /// Rows of the track list, without its title line.
    pub list: Rect,
    /// Track index shown on the first list row.
    pub list_offset: usize,
}

impl Regions {
    /// Map a left click at (`column`, `row`) to an action.
    pub fn action_at(&self, column: u16, row: u16) -> Option<Action> {
        let pos = Position::new(column, row);
        if self.prev.contains(pos) {
            Some(Action::Previous)
        } else if self.play.contains(pos) {
            Some(Action::TogglePlayPause)
        } else if self.next.contains(pos) {
            Some(Action::Next)
        } else if self.like.contains(pos) {
            Some(Action::ToggleLike)
        } else if self.progress.contains(pos) {
            seek_fraction(self.progress, column).map(Action::Seek)
        } else if self.list.contains(pos) {
            Some(Action::Select(self.list_offset + (row - self.list.y) as usize))
        } else {
            None
        }
    }
}

/// Fraction of the bar under `column`; the last cell maps to 1.0.
pub fn seek_fraction(bar: Rect, column: u16) -> Option<f64> {
    if bar.width == 0 || column < bar.x || column >= bar.x + bar.width {
        return None;
    }
    if bar.width == 1 {
        return Some(0.0);
    }
    Some(f64::from(column - bar.x) / f64::from(bar.width - 1))
}

/// Cell offset of the play-head for `fraction` on a bar `width` cells wide.
pub fn indicator_offset(width: u16, fraction: f64) -> u16 {
    if width == 0 {
        return 0;
    }
    let f = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    (f * f64::from(width - 1)).round() as u16
}

/// Compute a centred rectangle of the given size, shrunk to fit `r`.
pub fn centered_panel(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

fn bar_line(width: u16, fraction: f64, palette: &Palette) -> Line<'static> {
    if width == 0 {
        return Line::default();
    }
    let head = indicator_offset(width, fraction);
    let spans: Vec<Span<'static>> = (0..width)
        .map(|i| {
            if i == head {
                Span::styled("●", Style::default().fg(palette.indicator).bg(palette.bar_fill))
            } else if i < head {
                Span::styled(" ", Style::default().bg(palette.bar_fill))
            } else {
                Span::styled(" ", Style::default().bg(palette.bar_background))
            }
        })
        .collect();
    Line::from(spans)
}

fn song_line<E: Engine>(app: &App<E>, ui: &UiSettings) -> String {
    match app.controller.now_playing() {
        None => ui.idle_text.clone(),
        Some(track) => match app.controller.state().error.as_deref() {
            Some(err) => format!("{} ({err})", track.title),
            None => track.title.clone(),
        },
    }
}

fn play_glyph<'a, E: Engine>(app: &App<E>, icons: &'a IconSettings) -> &'a str {
    if app.controller.state().is_playing() {
        &icons.pause
    } else {
        &icons.play
    }
}

fn render_art(frame: &mut Frame, art: &Art, area: Rect, align: Alignment) {
    let width = art.width.min(area.width);
    let height = art.height.min(area.height);
    let x = match align {
        Alignment::Left => area.x,
        _ => area.x + (area.width - width) / 2,
    };
    let target = Rect {
        x,
        y: area.y,
        width,
        height,
    };
    frame.render_widget(Paragraph::new(art.lines.clone()), target);
}

/// Render the player into `frame` and report where the clickable parts are.
pub fn draw<E: Engine>(frame: &mut Frame, app: &App<E>, ui: &UiSettings, palette: &Palette) -> Regions {
    let panel = centered_panel(ui.window_width, ui.window_height, frame.area());
    let base = Style::default().fg(palette.text).bg(palette.background);
    frame.render_widget(Block::default().style(base), panel);

    let cover_rows = (ui.cover_px / 2).min(u32::from(u16::MAX)) as u16;
    let mascot_rows = app
        .mascot
        .as_ref()
        .and_then(|m| m.current())
        .map_or(0, |a| a.height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(cover_rows),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(mascot_rows),
        ])
        .split(panel);

    // Header
    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .style(base.add_modifier(Modifier::BOLD));
    frame.render_widget(header, chunks[0]);

    // Cover
    if let Some(cover) = app.cover.as_ref() {
        render_art(frame, cover, chunks[2], Alignment::Center);
    }

    // Song title
    let song = Paragraph::new(song_line(app, ui))
        .alignment(Alignment::Center)
        .style(base);
    frame.render_widget(song, chunks[4]);

    // Progress bar with labels either side
    let progress = app.controller.progress();
    let bar_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(1),
            Constraint::Length(7),
        ])
        .split(chunks[5]);
    frame.render_widget(
        Paragraph::new(progress.elapsed_text()).alignment(Alignment::Center).style(base),
        bar_row[0],
    );
    frame.render_widget(
        Paragraph::new(bar_line(bar_row[1].width, progress.fraction, palette)),
        bar_row[1],
    );
    frame.render_widget(
        Paragraph::new(progress.total_text()).alignment(Alignment::Center).style(base),
        bar_row[2],
    );

    // Buttons
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(chunks[7]);
    let heart = if app.is_current_liked() {
        ui.icons.liked()
    } else {
        ui.icons.heart.as_str()
    };
    let glyphs = [
        (buttons[1], ui.icons.prev.as_str()),
        (buttons[3], play_glyph(app, &ui.icons)),
        (buttons[5], ui.icons.next.as_str()),
        (buttons[7], heart),
    ];
    for (area, glyph) in glyphs {
        frame.render_widget(Paragraph::new(glyph).alignment(Alignment::Center).style(base), area);
    }

    // Track list
    let list_block = Block::default()
        .borders(Borders::TOP)
        .title(format!(" {} ", app.music_dir.display()))
        .title_bottom(Line::from(format!(" {} {} ", ui.icons.liked(), app.likes.len())).right_aligned())
        .style(base);
    let list_area = list_block.inner(chunks[9]);
    frame.render_widget(list_block, chunks[9]);
    let list_offset = render_track_list(frame, app, ui, base, list_area);

    // Mascot, bottom-left
    if let Some(art) = app.mascot.as_ref().and_then(|m| m.current()) {
        render_art(frame, art, chunks[10], Alignment::Left);
    }

    Regions {
        panel,
        progress: bar_row[1],
        prev: buttons[1],
        play: buttons[3],
        next: buttons[5],
        like: buttons[7],
        list: list_area,
        list_offset,
    }
}

/// Returns the index of the first visible track.
fn render_track_list<E: Engine>(frame: &mut Frame, app: &App<E>, ui: &UiSettings, base: Style, area: Rect) -> usize {
    let tracks = app.tracks();
    let total = tracks.len();
    let height = area.height as usize;

    // Keep the cursor near the middle; only build items for the visible window.
    let (start, end) = if total <= height || height == 0 {
        (0, total)
    } else {
        let half = height / 2;
        let mut start = app.selected.saturating_sub(half);
        if start + height > total {
            start = total - height;
        }
        (start, start + height)
    };

    let playing = app.controller.now_playing().map(|_| app.controller.state().index);
    let items: Vec<ListItem> = (start..end)
        .map(|i| {
            let track = &tracks[i];
            let marker = if playing == Some(i) { "♪ " } else { "  " };
            let mut text = format!("{marker}{}", track.title);
            if app.likes.is_liked(track) {
                text.push(' ');
                text.push_str(ui.icons.liked());
            }
            ListItem::new(text)
        })
        .collect();

    let list = List::new(items)
        .style(base)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(app.selected.saturating_sub(start)));
    }
    frame.render_stateful_widget(list, area, &mut state);
    start
}
