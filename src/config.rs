use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::logging::LogLevel;

const DEFAULT_ANIMATION_DURATION_MS: u32 = 1_000;
const DEFAULT_SCROLL_OFFSET_PX: u32 = 100;
const DEFAULT_NAV_OFFSET_PX: u32 = 80;
const DEFAULT_TYPING_SPEED_MS: u32 = 100;
const DEFAULT_TYPING_DELETE_SPEED_MS: u32 = 50;
const DEFAULT_TYPING_PAUSE_DELAY_MS: u32 = 2_000;
const DEFAULT_TYPING_RESTART_DELAY_MS: u32 = 500;
const DEFAULT_PRELOADER_DELAY_MS: u32 = 2_500;
const DEFAULT_SCROLL_THROTTLE_MS: u32 = 16;
const DEFAULT_SMOOTH_SCROLL_DURATION_MS: u32 = 800;
const DEFAULT_COUNTER_DURATION_MS: u32 = 2_000;
const DEFAULT_COUNTER_STEP_MS: u32 = 16;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const ANIMATION_DURATION_MS_BOUNDS: (u32, u32) = (0, 10_000);
const SCROLL_OFFSET_PX_BOUNDS: (u32, u32) = (0, 400);
const NAV_OFFSET_PX_BOUNDS: (u32, u32) = (0, 400);
const TYPING_SPEED_MS_BOUNDS: (u32, u32) = (10, 1_000);
const TYPING_DELETE_SPEED_MS_BOUNDS: (u32, u32) = (10, 1_000);
const TYPING_PAUSE_DELAY_MS_BOUNDS: (u32, u32) = (0, 20_000);
const TYPING_RESTART_DELAY_MS_BOUNDS: (u32, u32) = (0, 20_000);
const PRELOADER_DELAY_MS_BOUNDS: (u32, u32) = (0, 15_000);
const SCROLL_THROTTLE_MS_BOUNDS: (u32, u32) = (1, 1_000);
const SMOOTH_SCROLL_DURATION_MS_BOUNDS: (u32, u32) = (1, 5_000);
const COUNTER_DURATION_MS_BOUNDS: (u32, u32) = (16, 20_000);
const COUNTER_STEP_MS_BOUNDS: (u32, u32) = (1, 1_000);

/// Page tunables. Serialized in camelCase for the page-global `CONFIG`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub animation_duration: u32,
    pub scroll_offset: u32,
    pub nav_offset: u32,
    pub typing_speed: u32,
    pub typing_delete_speed: u32,
    pub typing_pause_delay: u32,
    pub typing_restart_delay: u32,
    pub preloader_delay: u32,
    pub scroll_throttle: u32,
    pub smooth_scroll_duration: u32,
    pub counter_duration: u32,
    pub counter_step: u32,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animation_duration: DEFAULT_ANIMATION_DURATION_MS,
            scroll_offset: DEFAULT_SCROLL_OFFSET_PX,
            nav_offset: DEFAULT_NAV_OFFSET_PX,
            typing_speed: DEFAULT_TYPING_SPEED_MS,
            typing_delete_speed: DEFAULT_TYPING_DELETE_SPEED_MS,
            typing_pause_delay: DEFAULT_TYPING_PAUSE_DELAY_MS,
            typing_restart_delay: DEFAULT_TYPING_RESTART_DELAY_MS,
            preloader_delay: DEFAULT_PRELOADER_DELAY_MS,
            scroll_throttle: DEFAULT_SCROLL_THROTTLE_MS,
            smooth_scroll_duration: DEFAULT_SMOOTH_SCROLL_DURATION_MS,
            counter_duration: DEFAULT_COUNTER_DURATION_MS,
            counter_step: DEFAULT_COUNTER_STEP_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Malformed(serde_json::Error),
    NotAnObject,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Malformed(e) => write!(f, "malformed config overrides: {e}"),
            ConfigError::NotAnObject => write!(f, "config overrides must be a JSON object"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Malformed(e)
    }
}

/// Overrides applied on top of the defaults, plus the keys that were refused.
pub struct ResolvedConfig {
    pub config: Config,
    pub rejected: Vec<&'static str>,
}

impl Config {
    /// Applies a JSON object of overrides. Unknown keys are ignored; values
    /// that are not in-range integers keep the default and are reported in
    /// `rejected`. Only input that is not a JSON object is an error.
    pub fn with_overrides(raw: &str) -> Result<ResolvedConfig, ConfigError> {
        let overrides = if raw.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(raw)? {
                Value::Object(map) => map,
                _ => return Err(ConfigError::NotAnObject),
            }
        };

        let mut config = Self::default();
        let mut rejected = Vec::new();

        let mut apply = |slot: &mut u32, key: &'static str, bounds: (u32, u32)| {
            let Some(value) = overrides.get(key) else {
                return;
            };
            let accepted = value
                .as_u64()
                .and_then(|value| u32::try_from(value).ok())
                .filter(|value| (bounds.0..=bounds.1).contains(value));
            match accepted {
                Some(value) => *slot = value,
                None => rejected.push(key),
            }
        };

        apply(&mut config.animation_duration, "animationDuration", ANIMATION_DURATION_MS_BOUNDS);
        apply(&mut config.scroll_offset, "scrollOffset", SCROLL_OFFSET_PX_BOUNDS);
        apply(&mut config.nav_offset, "navOffset", NAV_OFFSET_PX_BOUNDS);
        apply(&mut config.typing_speed, "typingSpeed", TYPING_SPEED_MS_BOUNDS);
        apply(&mut config.typing_delete_speed, "typingDeleteSpeed", TYPING_DELETE_SPEED_MS_BOUNDS);
        apply(&mut config.typing_pause_delay, "typingPauseDelay", TYPING_PAUSE_DELAY_MS_BOUNDS);
        apply(&mut config.typing_restart_delay, "typingRestartDelay", TYPING_RESTART_DELAY_MS_BOUNDS);
        apply(&mut config.preloader_delay, "preloaderDelay", PRELOADER_DELAY_MS_BOUNDS);
        apply(&mut config.scroll_throttle, "scrollThrottle", SCROLL_THROTTLE_MS_BOUNDS);
        apply(&mut config.smooth_scroll_duration, "smoothScrollDuration", SMOOTH_SCROLL_DURATION_MS_BOUNDS);
        apply(&mut config.counter_duration, "counterDuration", COUNTER_DURATION_MS_BOUNDS);
        apply(&mut config.counter_step, "counterStep", COUNTER_STEP_MS_BOUNDS);

        if let Some(value) = overrides.get("logLevel") {
            match value.as_str().and_then(LogLevel::parse) {
                Some(level) => config.log_level = level,
                None => rejected.push("logLevel"),
            }
        }

        Ok(ResolvedConfig { config, rejected })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_keep_defaults() {
        let resolved = Config::with_overrides("").expect("empty input is accepted");
        assert_eq!(resolved.config, Config::default());
        assert!(resolved.rejected.is_empty());
    }

    #[test]
    fn in_range_override_replaces_default() {
        let resolved = Config::with_overrides(r#"{"typingSpeed": 80, "logLevel": "debug"}"#)
            .expect("valid overrides");
        assert_eq!(resolved.config.typing_speed, 80);
        assert_eq!(resolved.config.log_level, LogLevel::Debug);
        assert_eq!(resolved.config.typing_delete_speed, DEFAULT_TYPING_DELETE_SPEED_MS);
    }

    #[test]
    fn out_of_range_override_is_rejected_and_default_kept() {
        let resolved = Config::with_overrides(r#"{"scrollThrottle": 0, "logLevel": "loud"}"#)
            .expect("well-formed json");
        assert_eq!(resolved.config.scroll_throttle, DEFAULT_SCROLL_THROTTLE_MS);
        assert_eq!(resolved.config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.rejected, vec!["scrollThrottle", "logLevel"]);
    }

    #[test]
    fn malformed_overrides_are_an_error() {
        assert!(matches!(
            Config::with_overrides("{typingSpeed: 80"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn bad_value_rejects_only_its_own_key() {
        let resolved = Config::with_overrides(r#"{"typingSpeed": 80, "navOffset": -5, "counterStep": "fast"}"#)
            .expect("object input is accepted");
        assert_eq!(resolved.config.typing_speed, 80);
        assert_eq!(resolved.config.nav_offset, DEFAULT_NAV_OFFSET_PX);
        assert_eq!(resolved.config.counter_step, DEFAULT_COUNTER_STEP_MS);
        assert_eq!(resolved.rejected, vec!["navOffset", "counterStep"]);
    }

    #[test]
    fn non_object_overrides_are_an_error() {
        assert!(matches!(Config::with_overrides("[80]"), Err(ConfigError::NotAnObject)));
    }

    #[test]
    fn exposed_json_uses_camel_case_keys() {
        let json: serde_json::Value =
            serde_json::from_str(&Config::default().to_json()).expect("config serializes");
        assert_eq!(json["typingPauseDelay"], 2_000);
        assert_eq!(json["preloaderDelay"], 2_500);
        assert_eq!(json["logLevel"], "info");
    }
}
