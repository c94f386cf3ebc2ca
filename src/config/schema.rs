use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/yinyang/config.toml` or `~/.config/yinyang/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `YINYANG__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub visualizer: VisualizerSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied to the media source at startup, in `[0, 1]`.
    pub initial_volume: f32,
    /// Amount `+` / `-` change the volume by.
    pub volume_step: f32,
    /// Number of time-domain samples per signal frame (power of two).
    pub fft_size: usize,
    /// Minimum spacing between position-advanced notifications (milliseconds).
    pub time_update_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 1.0,
            volume_step: 0.05,
            fft_size: 2048,
            time_update_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Past this position `prev` restarts the current track instead of
    /// moving to the previous one.
    pub restart_threshold_secs: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            restart_threshold_secs: 3.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[serde(alias = "scope", alias = "scope_line", alias = "default")]
    ScopeLine,
    #[serde(alias = "bars", alias = "bar_comb", alias = "cominatcha")]
    BarComb,
    #[serde(alias = "wave", alias = "filled_wave", alias = "zielony")]
    FilledWave,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [Self::ScopeLine, Self::BarComb, Self::FilledWave];

    /// The strategy after this one, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            Self::ScopeLine => Self::BarComb,
            Self::BarComb => Self::FilledWave,
            Self::FilledWave => Self::ScopeLine,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ScopeLine => "scope",
            Self::BarComb => "bars",
            Self::FilledWave => "wave",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
    /// Strategy mounted at startup.
    pub default: StrategyKind,
    /// Number of vertical segments drawn by the bar-comb strategy.
    pub bar_count: usize,
    /// Half-length of a bar at full deflection, in surface units.
    pub bar_scale: f64,
    /// Animation frame interval (milliseconds).
    pub frame_ms: u64,
    /// Terminals narrower than this many columns get the narrow surface.
    pub narrow_below_columns: u16,
}

impl Default for VisualizerSettings {
    fn default() -> Self {
        Self {
            default: StrategyKind::ScopeLine,
            bar_count: 30,
            bar_scale: 50.0,
            frame_ms: 16,
            narrow_below_columns: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Window title drawn in the top bar.
    pub header_text: String,

    /// Which time fields to show next to the seek bar, and in what order.
    ///
    /// Example: ["elapsed", "total", "remaining"]
    pub time_fields: Vec<TimeField>,

    /// Separator used to join `time_fields`.
    pub time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " Yin Yang Music ☯ ".to_string(),
            time_fields: vec![TimeField::Elapsed, TimeField::Total],
            time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
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

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    /// File name including extension, as selected.
    Filename,
    Title,
    Artist,
    Album,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Whether to follow symlinks when a directory is opened.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,

    /// Which fields build a track's display name.
    ///
    /// Example: ["artist", "title"] -> "Artist - Title"
    pub display_fields: Vec<TrackDisplayField>,
    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
            display_fields: vec![TrackDisplayField::Filename],
            display_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: LogLevel,
    /// Log file; the terminal belongs to the UI so nothing goes to stderr.
    pub file: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: std::env::temp_dir().join("yinyang.log"),
        }
    }
}
