use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_yinyang_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("YINYANG_CONFIG_PATH", "/tmp/yinyang-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/yinyang-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("yinyang")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("yinyang")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_strategy_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 0.5
volume_step = 0.1
fft_size = 1024

[playback]
restart_threshold_secs = 5.0

[visualizer]
default = "cominatcha"
bar_count = 12
bar_scale = 20.0

[controls]
scrub_seconds = 9

[ui]
header_text = "hello"
time_fields = ["elapsed", "remaining"]
time_separator = " | "

[library]
recursive = false
include_hidden = true
display_fields = ["artist", "title"]
display_separator = "::"

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("YINYANG_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("YINYANG__AUDIO__FFT_SIZE");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 0.5);
    assert_eq!(s.audio.volume_step, 0.1);
    assert_eq!(s.audio.fft_size, 1024);
    assert_eq!(s.playback.restart_threshold_secs, 5.0);
    assert_eq!(s.visualizer.default, StrategyKind::BarComb);
    assert_eq!(s.visualizer.bar_count, 12);
    assert_eq!(s.visualizer.bar_scale, 20.0);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.time_fields.len(), 2);
    assert!(matches!(s.ui.time_fields[1], TimeField::Remaining));
    assert_eq!(s.ui.time_separator, " | ");
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(matches!(s.library.display_fields[0], TrackDisplayField::Artist));
    assert_eq!(s.library.display_separator, "::");
    assert!(matches!(s.logging.level, LogLevel::Debug));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
fft_size = 512
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("YINYANG_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("YINYANG__AUDIO__FFT_SIZE", "256");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.fft_size, 256);
}

#[test]
fn defaults_validate() {
    let s = Settings::default();
    assert!(s.validate().is_ok());
    assert_eq!(s.playback.restart_threshold_secs, 3.0);
    assert_eq!(s.visualizer.bar_count, 30);
    assert_eq!(s.visualizer.default, StrategyKind::ScopeLine);
}

#[test]
fn validate_rejects_bad_fft_size_and_volume() {
    let mut s = Settings::default();
    s.audio.fft_size = 1000;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.fft_size = 16;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.initial_volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.visualizer.bar_count = 0;
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_negative_or_nan_restart_threshold() {
    let mut s = Settings::default();
    s.playback.restart_threshold_secs = 0.0;
    assert!(s.validate().is_ok());

    s.playback.restart_threshold_secs = -1.0;
    assert!(s.validate().is_err());

    s.playback.restart_threshold_secs = f64::NAN;
    assert!(s.validate().is_err());
}

#[test]
fn strategy_cycle_visits_every_kind() {
    let mut kind = StrategyKind::ScopeLine;
    let mut seen = Vec::new();
    for _ in 0..StrategyKind::ALL.len() {
        seen.push(kind);
        kind = kind.cycle();
    }
    assert_eq!(kind, StrategyKind::ScopeLine);
    assert_eq!(seen, StrategyKind::ALL.to_vec());
}
