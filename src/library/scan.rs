use std::path::{Path, PathBuf};

use lofty::prelude::AudioFile;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::display_title;
use super::model::Track;

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.'))
                .any(|e| !e.is_empty() && e.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the regular files directly inside `dir` whose extension is in
/// `extensions`, sorted case-insensitively by file name.
fn list_files(dir: &Path, extensions: &[String], follow_links: bool, what: &str) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "{what} folder not found");
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(follow_links)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && !is_hidden(p) && has_extension(p, extensions))
        .collect();

    files.sort_by_key(|p| {
        p.file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    files
}

fn probe_duration(path: &Path) -> Option<std::time::Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "could not read track properties");
            None
        }
    }
}

/// Scan the music directory and build the track list.
pub fn scan_tracks(dir: &Path, settings: &LibrarySettings, title_max_chars: usize) -> Vec<Track> {
    let tracks: Vec<Track> = list_files(
        dir,
        &settings.audio_extensions,
        settings.follow_links,
        "music",
    )
    .into_iter()
    .map(|path| Track {
        title: display_title(&path, title_max_chars),
        duration: probe_duration(&path),
        path,
    })
    .collect();

    tracing::info!(dir = %dir.display(), count = tracks.len(), "scanned music folder");
    tracks
}

/// Scan the image directory for decorative pictures.
pub fn scan_images(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let images = list_files(
        dir,
        &settings.image_extensions,
        settings.follow_links,
        "image",
    );
    if images.is_empty() {
        tracing::warn!(dir = %dir.display(), "no images found");
    }
    images
}

/// Choose one entry uniformly at random.
pub fn pick_random<T>(items: &[T]) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    items.get(rand::random_range(0..items.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn has_extension_matches_configured_extensions_case_insensitive() {
        let exts = LibrarySettings::default().audio_extensions;
        assert!(has_extension(Path::new("/tmp/a.mp3"), &exts));
        assert!(has_extension(Path::new("/tmp/a.MP3"), &exts));
        assert!(has_extension(Path::new("/tmp/a.wav"), &exts));
        assert!(!has_extension(Path::new("/tmp/a.flac"), &exts));
        assert!(!has_extension(Path::new("/tmp/a.txt"), &exts));
        assert!(!has_extension(Path::new("/tmp/a"), &exts));
    }

    #[test]
    fn has_extension_tolerates_leading_dots_in_settings() {
        let exts = vec![".PNG".to_string(), " jpg ".to_string()];
        assert!(has_extension(Path::new("cover.png"), &exts));
        assert!(has_extension(Path::new("cover.JPG"), &exts));
    }

    #[test]
    fn scan_tracks_filters_non_audio_and_sorts_case_insensitive() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.wav"), b"not a real wav").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();
        fs::write(dir.path().join(".hidden.mp3"), b"ignore me").unwrap();

        let tracks = scan_tracks(dir.path(), &LibrarySettings::default(), 25);
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].title, "A");
        assert_eq!(tracks[1].title, "b");
        // Garbage bytes have no readable properties.
        assert_eq!(tracks[0].duration, None);
    }

    #[test]
    fn scan_tracks_is_not_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let tracks = scan_tracks(dir.path(), &LibrarySettings::default(), 25);
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "root");
    }

    #[test]
    fn missing_folder_yields_empty_catalog() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(scan_tracks(&missing, &LibrarySettings::default(), 25).is_empty());
        assert!(scan_images(&missing, &LibrarySettings::default()).is_empty());
    }

    #[test]
    fn scan_images_only_returns_known_image_types() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.png"), b"x").unwrap();
        fs::write(dir.path().join("two.jpeg"), b"x").unwrap();
        fs::write(dir.path().join("three.gif"), b"x").unwrap();

        let images = scan_images(dir.path(), &LibrarySettings::default());
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["one.png", "two.jpeg"]);
    }

    #[test]
    fn pick_random_returns_member_or_none() {
        let empty: Vec<u8> = Vec::new();
        assert!(pick_random(&empty).is_none());

        let items = vec![1, 2, 3];
        for _ in 0..20 {
            assert!(items.contains(pick_random(&items).unwrap()));
        }
    }
}
