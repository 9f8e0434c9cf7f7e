use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `MEOWSIC__`) over an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MEOWSIC")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.sample_interval_ms == 0 {
            return Err("playback.sample_interval_ms must be >= 1".to_string());
        }
        if self.assets.mascot_frame_ms == 0 {
            return Err("assets.mascot_frame_ms must be >= 1".to_string());
        }
        if self.ui.title_max_chars < 4 {
            return Err("ui.title_max_chars must be >= 4".to_string());
        }
        if self.ui.cover_px == 0 || self.ui.mascot_px == 0 {
            return Err("ui.cover_px and ui.mascot_px must be >= 1".to_string());
        }
        if self.library.audio_extensions.is_empty() {
            return Err("library.audio_extensions must not be empty".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `MEOWSIC_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MEOWSIC_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/meowsic/config.toml`
/// or `~/.config/meowsic/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("meowsic").join("config.toml"))
}

/// Compute the default log file path under `$XDG_STATE_HOME/meowsic/` or
/// `~/.local/state/meowsic/`, falling back to the system temp dir.
pub fn default_log_path() -> PathBuf {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home
        .unwrap_or_else(env::temp_dir)
        .join("meowsic")
        .join("meowsic.log")
}
