use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `YINYANG__`), then an
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
            ::config::Environment::with_prefix("YINYANG")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let fft = self.audio.fft_size;
        if !fft.is_power_of_two() || !(32..=32768).contains(&fft) {
            return Err(format!(
                "audio.fft_size must be a power of two in [32, 32768], got {fft}"
            ));
        }
        if !(0.0..=1.0).contains(&self.audio.initial_volume) {
            return Err("audio.initial_volume must be within [0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.volume_step) {
            return Err("audio.volume_step must be within [0, 1]".to_string());
        }
        let threshold = self.playback.restart_threshold_secs;
        if threshold.is_nan() || threshold < 0.0 {
            return Err("playback.restart_threshold_secs must be >= 0".to_string());
        }
        if self.visualizer.bar_count == 0 {
            return Err("visualizer.bar_count must be >= 1".to_string());
        }
        if self.visualizer.frame_ms == 0 {
            return Err("visualizer.frame_ms must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `YINYANG_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("YINYANG_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/yinyang/config.toml`
/// or `~/.config/yinyang/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("yinyang").join("config.toml"))
}
