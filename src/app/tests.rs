use std::path::PathBuf;
use std::time::Duration;

use image::{Rgba, RgbaImage};

use super::*;
use crate::audio::AudioEvent;
use crate::audio::fake::FakeEngine;
use crate::library::Track;
use crate::playback::{Controller, Status};

fn style() -> CoverStyle {
    CoverStyle {
        size_px: 12,
        corner_radius: 2,
        background: [0, 0, 0],
    }
}

fn app_with(names: &[&str], images: Vec<PathBuf>) -> App<FakeEngine> {
    let tracks = names
        .iter()
        .map(|n| Track::new(format!("music/{n}"), *n).with_duration(Duration::from_secs(120)))
        .collect();
    App::new(
        Controller::new(tracks, FakeEngine::default()),
        PathBuf::from("music"),
        images,
        style(),
    )
}

fn app(names: &[&str]) -> App<FakeEngine> {
    app_with(names, Vec::new())
}

#[test]
fn like_follows_the_track_not_the_position() {
    let mut app = app(&["A.mp3", "B.mp3"]);

    app.dispatch(Action::ToggleLike);
    assert!(app.is_current_liked());

    app.dispatch(Action::Next);
    assert_eq!(app.controller.current_track().unwrap().title, "B.mp3");
    assert!(!app.is_current_liked());

    app.dispatch(Action::Previous);
    assert_eq!(app.controller.current_track().unwrap().title, "A.mp3");
    assert!(app.is_current_liked());
}

#[test]
fn empty_library_ignores_every_action() {
    let mut app = app(&[]);
    for action in [
        Action::TogglePlayPause,
        Action::Next,
        Action::Previous,
        Action::ToggleLike,
        Action::Seek(0.3),
        Action::SeekBy(5),
        Action::SelectNext,
        Action::SelectPrev,
        Action::Select(3),
        Action::PlaySelected,
    ] {
        app.dispatch(action);
    }

    assert!(!app.has_tracks());
    assert!(app.controller.engine().calls.is_empty());
    assert!(app.controller.now_playing().is_none());
    assert!(app.likes.is_empty());
    assert_eq!(app.selected, 0);
}

#[test]
fn cursor_wraps_and_play_selected_starts_it() {
    let mut app = app(&["A.mp3", "B.mp3", "C.mp3"]);

    app.dispatch(Action::SelectPrev);
    assert_eq!(app.selected, 2);
    app.dispatch(Action::SelectNext);
    assert_eq!(app.selected, 0);

    app.dispatch(Action::Select(1));
    app.dispatch(Action::PlaySelected);
    assert_eq!(app.controller.state().index, 1);
    assert!(app.controller.state().is_playing());
}

#[test]
fn cursor_follows_auto_advance() {
    let mut app = app(&["A.mp3", "B.mp3"]);
    app.dispatch(Action::TogglePlayPause);
    app.dispatch(Action::Select(0));

    let id = app.controller.state().load_id;
    app.handle_audio_event(AudioEvent::Finished { id });

    assert_eq!(app.controller.state().index, 1);
    assert_eq!(app.selected, 1);
}

#[test]
fn select_out_of_range_is_ignored() {
    let mut app = app(&["A.mp3"]);
    app.dispatch(Action::Select(5));
    assert_eq!(app.selected, 0);
}

#[test]
fn failed_track_does_not_advance() {
    let mut app = app(&["A.mp3", "B.mp3"]);
    app.dispatch(Action::TogglePlayPause);

    let id = app.controller.state().load_id;
    app.handle_audio_event(AudioEvent::Failed {
        id,
        reason: "cannot decode".into(),
    });

    assert_eq!(app.controller.state().index, 0);
    assert_eq!(app.controller.state().status, Status::Stopped);
}

#[test]
fn quit_sets_flag() {
    let mut app = app(&["A.mp3"]);
    assert!(!app.should_quit);
    app.dispatch(Action::Quit);
    assert!(app.should_quit);
}

#[test]
fn cover_is_loaded_from_the_image_folder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pic.png");
    RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255]))
        .save(&path)
        .unwrap();

    let mut app = app_with(&["A.mp3"], vec![path]);
    assert_eq!(app.cover.as_ref().map(|c| c.width), Some(12));

    app.dispatch(Action::NewCover);
    assert!(app.cover.is_some());
}

#[test]
fn broken_cover_degrades_to_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pic.jpg");
    std::fs::write(&path, b"not a jpeg").unwrap();

    let app = app_with(&["A.mp3"], vec![path]);
    assert!(app.cover.is_none());
}
