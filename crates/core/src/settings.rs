//! Widget configuration.
//!
//! Settings deserialize from TOML with `#[serde(default)]`, so a partial
//! configuration merges over the defaults below. The legacy key names
//! `period` and `wheel-delta` are accepted as aliases for the current
//! spellings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::style::TimingFunction;

pub const DEFAULT_DURATION_MS: u64 = 800;
pub const DEFAULT_DEBOUNCE_INTERVAL_MS: u64 = 300;
pub const DEFAULT_WHEEL_THRESHOLD: i32 = 100;

/// Which page edges wrap around on relative navigation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Both edges are hard stops.
    None,
    /// Paging down past the last page wraps to the first.
    #[default]
    Down,
    /// Paging up past the first page wraps to the last.
    Up,
    /// Both edges wrap.
    Both,
}

impl LoopMode {
    pub fn wraps_down(self) -> bool {
        matches!(self, LoopMode::Down | LoopMode::Both)
    }

    pub fn wraps_up(self) -> bool {
        matches!(self, LoopMode::Up | LoopMode::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Transition length in milliseconds.
    pub duration: u64,
    pub timing_function: TimingFunction,
    /// Extra settle time, beyond `duration`, before the next wheel input is
    /// accepted (milliseconds).
    #[serde(alias = "period")]
    pub debounce_interval: u64,
    /// Minimum wheel delta magnitude to accept.
    #[serde(alias = "wheel-delta")]
    pub wheel_threshold: i32,
    /// Render the marker navigation bar.
    pub pagination: bool,
    /// Map arrow keys to relative navigation.
    pub keyboard: bool,
    #[serde(rename = "loop")]
    pub loop_mode: LoopMode,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            duration: DEFAULT_DURATION_MS,
            timing_function: TimingFunction::Ease,
            debounce_interval: DEFAULT_DEBOUNCE_INTERVAL_MS,
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            pagination: true,
            keyboard: true,
            loop_mode: LoopMode::Down,
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    pub level: String,
    pub max_files: usize,
    pub directory: PathBuf,
    pub otlp_endpoint: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> LoggingSettings {
        LoggingSettings {
            enabled: false,
            level: "info".to_string(),
            max_files: 3,
            directory: PathBuf::from("logs"),
            otlp_endpoint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = Settings::default();

        assert_eq!(settings.duration, 800);
        assert_eq!(settings.timing_function, TimingFunction::Ease);
        assert_eq!(settings.debounce_interval, 300);
        assert_eq!(settings.wheel_threshold, 100);
        assert!(settings.pagination);
        assert!(settings.keyboard);
        assert_eq!(settings.loop_mode, LoopMode::Down);
    }

    #[test]
    fn partial_config_merges_over_defaults() {
        let settings: Settings = toml::from_str(
            "duration = 400\n\
             pagination = false\n",
        )
        .unwrap();

        assert_eq!(settings.duration, 400);
        assert!(!settings.pagination);
        assert_eq!(settings.debounce_interval, 300);
        assert_eq!(settings.loop_mode, LoopMode::Down);
    }

    #[test]
    fn legacy_key_names_are_accepted() {
        let settings: Settings = toml::from_str(
            "period = 150\n\
             wheel-delta = 60\n\
             loop = \"both\"\n",
        )
        .unwrap();

        assert_eq!(settings.debounce_interval, 150);
        assert_eq!(settings.wheel_threshold, 60);
        assert_eq!(settings.loop_mode, LoopMode::Both);
    }

    #[test]
    fn loop_mode_wrap_table() {
        assert!(!LoopMode::None.wraps_down());
        assert!(!LoopMode::None.wraps_up());
        assert!(LoopMode::Down.wraps_down());
        assert!(!LoopMode::Down.wraps_up());
        assert!(!LoopMode::Up.wraps_down());
        assert!(LoopMode::Up.wraps_up());
        assert!(LoopMode::Both.wraps_down());
        assert!(LoopMode::Both.wraps_up());
    }

    #[test]
    fn settings_round_trip_through_helpers() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("Settings.toml");

        let settings = Settings {
            duration: 500,
            loop_mode: LoopMode::None,
            ..Settings::default()
        };

        crate::helpers::save_toml(&settings, &path).unwrap();
        let loaded: Settings = crate::helpers::load_toml(&path).unwrap();

        assert_eq!(loaded, settings);
    }
}
