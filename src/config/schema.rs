use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/meowsic/config.toml` or `~/.config/meowsic/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MEOWSIC__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub assets: AssetSettings,
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory scanned (non-recursively) for audio files.
    pub music_dir: PathBuf,
    /// Directory scanned (non-recursively) for decorative images.
    pub image_dir: PathBuf,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub audio_extensions: Vec<String>,
    /// File extensions to treat as images (case-insensitive, without dot).
    pub image_extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("music"),
            image_dir: PathBuf::from("image_folder"),
            audio_extensions: vec!["mp3".into(), "wav".into()],
            image_extensions: vec!["png".into(), "jpg".into(), "jpeg".into()],
            follow_links: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Animated mascot shown in the bottom-left corner.
    pub mascot_path: PathBuf,
    /// Delay between mascot frames (milliseconds).
    pub mascot_frame_ms: u64,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            mascot_path: PathBuf::from("icon").join("cat.gif"),
            mascot_frame_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// How often the audio thread samples the playing position (milliseconds).
    pub sample_interval_ms: u64,
    /// Start playing the first track right after startup.
    pub autoplay: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            sample_interval_ms: 100,
            autoplay: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Text shown at the top of the player panel.
    pub header_text: String,
    /// Text shown in place of the song title when nothing is loaded.
    pub idle_text: String,
    /// Song titles longer than this are shortened with an ellipsis.
    pub title_max_chars: usize,
    /// Fixed panel width in terminal cells.
    pub window_width: u16,
    /// Fixed panel height in terminal cells.
    pub window_height: u16,
    /// Cover image edge length in pixels (one cell is two pixels tall).
    pub cover_px: u32,
    /// Corner radius of the cover image in pixels.
    pub cover_corner_radius: u32,
    /// Mascot edge length in pixels.
    pub mascot_px: u32,
    pub theme: ThemeSettings,
    pub icons: IconSettings,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: "✧˚ ༘ ⋆。˚ Meowsic Player ⋆.ೃ࿔*:･".to_string(),
            idle_text: "No song playing".to_string(),
            title_max_chars: 25,
            window_width: 48,
            window_height: 44,
            cover_px: 24,
            cover_corner_radius: 4,
            mascot_px: 12,
            theme: ThemeSettings::default(),
            icons: IconSettings::default(),
        }
    }
}

/// Panel colours as `#rrggbb` strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub background: String,
    pub text: String,
    pub bar_background: String,
    pub bar_fill: String,
    pub indicator: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            background: "#344e41".to_string(),
            text: "#ffffff".to_string(),
            bar_background: "#d8e2dc".to_string(),
            bar_fill: "#ffb5a7".to_string(),
            indicator: "#735d78".to_string(),
        }
    }
}

/// Button glyphs. `heart_filled` falls back to `heart` when unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IconSettings {
    pub prev: String,
    pub play: String,
    pub pause: String,
    pub next: String,
    pub heart: String,
    pub heart_filled: Option<String>,
}

impl IconSettings {
    pub fn liked(&self) -> &str {
        self.heart_filled.as_deref().unwrap_or(&self.heart)
    }
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            prev: "⏮".to_string(),
            play: "▶".to_string(),
            pause: "⏸".to_string(),
            next: "⏭".to_string(),
            heart: "♡".to_string(),
            heart_filled: Some("♥".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file path; defaults to `$XDG_STATE_HOME/meowsic/meowsic.log`.
    pub file: Option<PathBuf>,
    /// Default level filter, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
