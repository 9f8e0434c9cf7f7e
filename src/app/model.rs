//! Application model types: `App` and the `Action`s it understands.

use std::path::PathBuf;
use std::time::Instant;

use crate::art::{self, Art, Mascot};
use crate::audio::{AudioEvent, Engine};
use crate::library::{Track, pick_random};
use crate::likes::LikeRegistry;
use crate::playback::Controller;

/// Something the user asked for, by key or by mouse.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Action {
    TogglePlayPause,
    Next,
    Previous,
    ToggleLike,
    /// Seek to a fraction of the current track.
    Seek(f64),
    /// Scrub by a number of seconds (negative goes back).
    SeekBy(i64),
    SelectNext,
    SelectPrev,
    /// Move the list cursor onto a row.
    Select(usize),
    PlaySelected,
    NewCover,
    Quit,
}

/// How to render cover pictures.
#[derive(Clone, Debug)]
pub struct CoverStyle {
    pub size_px: u32,
    pub corner_radius: u32,
    pub background: [u8; 3],
}

/// The main application model.
pub struct App<E: Engine> {
    pub controller: Controller<E>,
    pub likes: LikeRegistry,
    /// List cursor; follows the playing track whenever a new one starts.
    pub selected: usize,
    pub music_dir: PathBuf,
    pub images: Vec<PathBuf>,
    pub cover: Option<Art>,
    pub mascot: Option<Mascot>,
    pub should_quit: bool,

    cover_style: CoverStyle,
    /// Controller start count the cover was last chosen for.
    cover_for_start: u64,
}

impl<E: Engine> App<E> {
    pub fn new(controller: Controller<E>, music_dir: PathBuf, images: Vec<PathBuf>, cover_style: CoverStyle) -> Self {
        let mut app = Self {
            controller,
            likes: LikeRegistry::new(),
            selected: 0,
            music_dir,
            images,
            cover: None,
            mascot: None,
            should_quit: false,
            cover_style,
            cover_for_start: 0,
        };
        app.new_cover();
        app
    }

    pub fn set_mascot(&mut self, mascot: Mascot) {
        self.mascot = Some(mascot);
    }

    pub fn tracks(&self) -> &[Track] {
        self.controller.tracks()
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks().is_empty()
    }

    pub fn is_current_liked(&self) -> bool {
        self.controller
            .current_track()
            .is_some_and(|t| self.likes.is_liked(t))
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::TogglePlayPause => self.controller.toggle_play_pause(),
            Action::Next => self.controller.next(),
            Action::Previous => self.controller.previous(),
            Action::ToggleLike => {
                if let Some(track) = self.controller.current_track() {
                    self.likes.toggle(track);
                }
            }
            Action::Seek(fraction) => self.controller.seek(fraction),
            Action::SeekBy(secs) => self.controller.seek_by(secs),
            Action::SelectNext => {
                let n = self.tracks().len();
                if n > 0 {
                    self.selected = (self.selected + 1) % n;
                }
            }
            Action::SelectPrev => {
                let n = self.tracks().len();
                if n > 0 {
                    self.selected = (self.selected + n - 1) % n;
                }
            }
            Action::Select(i) => {
                if i < self.tracks().len() {
                    self.selected = i;
                }
            }
            Action::PlaySelected => self.controller.play_index(self.selected),
            Action::NewCover => self.new_cover(),
            Action::Quit => self.should_quit = true,
        }
        self.follow_track_change();
    }

    pub fn handle_audio_event(&mut self, event: AudioEvent) {
        self.controller.handle_event(event);
        self.follow_track_change();
    }

    /// Advance time-driven decorations.
    pub fn tick(&mut self, now: Instant) {
        if let Some(m) = self.mascot.as_mut() {
            m.tick(now);
        }
    }

    /// Replace the cover with another random picture from the image folder.
    pub fn new_cover(&mut self) {
        let Some(path) = pick_random(&self.images) else {
            self.cover = None;
            return;
        };
        let style = &self.cover_style;
        match art::load_cover(path, style.size_px, style.corner_radius, style.background) {
            Ok(cover) => self.cover = Some(cover),
            Err(err) => {
                tracing::warn!("{err:#}");
                self.cover = None;
            }
        }
    }

    /// After a new track starts: move the cursor onto it and pick a new cover.
    fn follow_track_change(&mut self) {
        let starts = self.controller.starts();
        if starts == self.cover_for_start {
            return;
        }
        self.cover_for_start = starts;
        self.selected = self.controller.state().index;
        self.new_cover();
    }
}
