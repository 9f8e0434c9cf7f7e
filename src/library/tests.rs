use super::display::display_title;
use std::path::Path;

#[test]
fn display_title_strips_extension_and_directories() {
    assert_eq!(display_title(Path::new("music/Song.mp3"), 25), "Song");
    assert_eq!(display_title(Path::new("/a/b/c.d.wav"), 25), "c.d");
}

#[test]
fn display_title_keeps_titles_at_the_limit() {
    let name = "a".repeat(25);
    let path = format!("music/{name}.mp3");
    assert_eq!(display_title(Path::new(&path), 25), name);
}

#[test]
fn display_title_shortens_long_titles_with_ellipsis() {
    let path = Path::new("music/An Extremely Long Song Title Indeed.mp3");
    let title = display_title(path, 25);
    assert_eq!(title, "An Extremely Long Song...");
    assert_eq!(title.chars().count(), 25);
}

#[test]
fn display_title_counts_characters_not_bytes() {
    let path = Path::new("ねこねこねこねこねこねこねこねこねこねこ.mp3");
    let title = display_title(path, 10);
    assert_eq!(title, "ねこねこねこね...");
}
