//! In-memory registry of liked tracks. Nothing is persisted between runs.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::library::Track;

#[derive(Debug, Default)]
pub struct LikeRegistry {
    liked: HashSet<PathBuf>,
}

impl LikeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the liked flag for `track` and return the new state.
    pub fn toggle(&mut self, track: &Track) -> bool {
        if self.liked.remove(&track.path) {
            tracing::debug!(track = %track.path.display(), "unliked");
            false
        } else {
            tracing::debug!(track = %track.path.display(), "liked");
            self.liked.insert(track.path.clone());
            true
        }
    }

    pub fn is_liked(&self, track: &Track) -> bool {
        self.liked.contains(&track.path)
    }

    pub fn len(&self) -> usize {
        self.liked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liked.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut likes = LikeRegistry::new();
        let a = Track::new("music/A.mp3", "A");

        assert!(!likes.is_liked(&a));
        assert!(likes.toggle(&a));
        assert!(likes.is_liked(&a));
        assert_eq!(likes.len(), 1);
    }

    #[test]
    fn toggling_twice_restores_original_state() {
        let mut likes = LikeRegistry::new();
        let a = Track::new("music/A.mp3", "A");
        let b = Track::new("music/B.mp3", "B");
        likes.toggle(&b);

        likes.toggle(&a);
        likes.toggle(&a);
        assert!(!likes.is_liked(&a));
        assert!(likes.is_liked(&b));

        likes.toggle(&b);
        likes.toggle(&b);
        assert!(likes.is_liked(&b));
    }

    #[test]
    fn identity_is_the_path_not_the_title() {
        let mut likes = LikeRegistry::new();
        likes.toggle(&Track::new("music/A.mp3", "A"));

        assert!(likes.is_liked(&Track::new("music/A.mp3", "renamed")));
        assert!(!likes.is_liked(&Track::new("other/A.mp3", "A")));
    }
}
