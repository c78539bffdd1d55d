use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::clock::Mode;
use crate::error::Result;

pub const DEFAULT_FOCUS_MINUTES: f64 = 0.5;
pub const DEFAULT_RELAX_MINUTES: f64 = 0.5;
pub const CLASSIC_FOCUS_MINUTES: f64 = 25.0;
pub const CLASSIC_RELAX_MINUTES: f64 = 5.0;
pub const DEFAULT_TICK_MS: u64 = 100;
pub const MIN_TICK_MS: u64 = 50;
pub const MAX_TICK_MS: u64 = 1000;
pub const SETTINGS_DIR: &str = "mind-pace";

// ============================================================================
// Session durations
// ============================================================================

/// Focus and relax lengths in whole seconds, fixed once a timer is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub focus_secs: u64,
    pub relax_secs: u64,
}

impl SessionConfig {
    pub fn new(focus_secs: u64, relax_secs: u64) -> Self {
        Self {
            focus_secs: focus_secs.max(1),
            relax_secs: relax_secs.max(1),
        }
    }

    pub fn duration_for(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Focus => self.focus_secs,
            Mode::Relax => self.relax_secs,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionDefaults::default().session_config()
    }
}

/// Fallback durations, in minutes, used when parameters are unusable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionDefaults {
    pub focus_minutes: f64,
    pub relax_minutes: f64,
}

impl SessionDefaults {
    pub fn classic() -> Self {
        Self {
            focus_minutes: CLASSIC_FOCUS_MINUTES,
            relax_minutes: CLASSIC_RELAX_MINUTES,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(
            minutes_to_secs(self.focus_minutes)
                .or_else(|| minutes_to_secs(DEFAULT_FOCUS_MINUTES))
                .unwrap_or(30),
            minutes_to_secs(self.relax_minutes)
                .or_else(|| minutes_to_secs(DEFAULT_RELAX_MINUTES))
                .unwrap_or(30),
        )
    }
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            relax_minutes: DEFAULT_RELAX_MINUTES,
        }
    }
}

/// Rounds to whole seconds; any positive input yields at least one second.
pub fn minutes_to_secs(minutes: f64) -> Option<u64> {
    if !minutes.is_finite() || minutes <= 0.0 {
        return None;
    }
    Some(((minutes * 60.0).round() as u64).max(1))
}

// ============================================================================
// Navigation parameters
// ============================================================================

/// Values handed from the home screen to the timer screen, as typed.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerParams {
    pub focus_time: Option<String>,
    pub relax_time: Option<String>,
}

impl TimerParams {
    pub fn from_minutes(focus: f64, relax: f64) -> Self {
        Self {
            focus_time: Some(focus.to_string()),
            relax_time: Some(relax.to_string()),
        }
    }

    pub fn session_config(&self, defaults: &SessionDefaults) -> SessionConfig {
        let fallback = defaults.session_config();
        let focus = parse_minutes(self.focus_time.as_deref()).and_then(minutes_to_secs);
        let relax = parse_minutes(self.relax_time.as_deref()).and_then(minutes_to_secs);
        if focus.is_none() || relax.is_none() {
            tracing::debug!(params = ?self, "timer parameter fell back to default");
        }
        SessionConfig::new(
            focus.unwrap_or(fallback.focus_secs),
            relax.unwrap_or(fallback.relax_secs),
        )
    }
}

/// Plain numbers are minutes; `1h`, `2m30s`, `90s` forms are also accepted.
pub fn parse_minutes(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let minutes = match raw.parse::<f64>() {
        Ok(m) => m,
        Err(_) => parse_duration(raw).ok()?,
    };
    (minutes.is_finite() && minutes > 0.0).then_some(minutes)
}

/// Parses `h`/`m`/`s` suffixed durations into minutes.
pub fn parse_duration(s: &str) -> std::result::Result<f64, String> {
    let s = s.trim().to_lowercase();
    let mut total = 0.0;
    let mut num = String::new();

    for c in s.chars() {
        match c {
            '0'..='9' | '.' => num.push(c),
            'h' => { total += num.parse::<f64>().map_err(|_| "Invalid hours")? * 60.0; num.clear(); }
            'm' => { total += num.parse::<f64>().map_err(|_| "Invalid minutes")?; num.clear(); }
            's' => { total += num.parse::<f64>().map_err(|_| "Invalid seconds")? / 60.0; num.clear(); }
            _ => return Err("Invalid format".into()),
        }
    }
    if !num.is_empty() {
        return Err("Missing unit".into());
    }

    if total > 0.0 { Ok(total) } else { Err("Duration must be > 0".into()) }
}

// ============================================================================
// Settings file
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub focus_minutes: f64,
    pub relax_minutes: f64,
    pub tick_ms: u64,
    pub theme: String,
    pub vessel: String,
    pub skip_home: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            relax_minutes: DEFAULT_RELAX_MINUTES,
            tick_ms: DEFAULT_TICK_MS,
            theme: "default".into(),
            vessel: "coffee".into(),
            skip_home: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Missing files are normal; malformed ones are logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded settings");
                config
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn session_defaults(&self) -> SessionDefaults {
        let pick = |m: f64, fallback: f64| if minutes_to_secs(m).is_some() { m } else { fallback };
        SessionDefaults {
            focus_minutes: pick(self.focus_minutes, DEFAULT_FOCUS_MINUTES),
            relax_minutes: pick(self.relax_minutes, DEFAULT_RELAX_MINUTES),
        }
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS))
    }
}

pub fn get_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(".");
    path.push(SETTINGS_DIR);
    path.push(filename);
    path
}
