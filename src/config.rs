use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::error::{MonitorError, Result};
use crate::system::history::{DEFAULT_CAPACITY, MAX_CAPACITY};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sampler: SamplerConfig,
    pub ui: UiConfig,
    pub keybinds: KeybindsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub interval_ms: u64,
    pub history_capacity: usize,
    pub disk_path: PathBuf,
    pub sample_timeout_ms: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            interval_ms: 1000,
            history_capacity: DEFAULT_CAPACITY,
            disk_path: PathBuf::from("/"),
            sample_timeout_ms: 2000,
        }
    }
}

impl SamplerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn sample_timeout(&self) -> Duration {
        Duration::from_millis(self.sample_timeout_ms)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub sample_now: String,
    pub cycle_theme: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            sample_now: "r".to_string(),
            cycle_theme: "t".to_string(),
            help: "?".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Rejects settings the sampling loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        let sampler = &self.sampler;
        if sampler.interval_ms == 0 {
            return Err(MonitorError::ConfigInvalid(
                "interval_ms must be greater than 0".to_string(),
            ));
        }
        if sampler.history_capacity == 0 {
            return Err(MonitorError::ConfigInvalid(
                "history_capacity must be greater than 0".to_string(),
            ));
        }
        if sampler.history_capacity > MAX_CAPACITY {
            return Err(MonitorError::ConfigInvalid(format!(
                "history_capacity must be at most {MAX_CAPACITY}"
            )));
        }
        if sampler.sample_timeout_ms == 0 {
            return Err(MonitorError::ConfigInvalid(
                "sample_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if sampler.disk_path.as_os_str().is_empty() {
            return Err(MonitorError::ConfigInvalid(
                "disk_path must not be empty".to_string(),
            ));
        }
        if parse_level(&self.log.level).is_none() {
            return Err(MonitorError::ConfigInvalid(format!(
                "unknown log level `{}`",
                self.log.level
            )));
        }
        Ok(())
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysgauge").join("config.toml"))
}

/// Loads the user config, falling back to defaults when none exists.
pub fn load_config() -> Result<Config> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_config(&path, &contents),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
        Err(err) => Err(unreadable(&path, err)),
    }
}

/// Loads an explicitly named config file. A missing file is an error.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|err| unreadable(path, err))?;
    parse_config(path, &contents)
}

fn unreadable(path: &Path, err: std::io::Error) -> MonitorError {
    MonitorError::ConfigInvalid(format!("cannot read {}: {err}", path.display()))
}

fn parse_config(path: &Path, contents: &str) -> Result<Config> {
    toml::from_str(contents)
        .map_err(|err| MonitorError::ConfigInvalid(format!("{}: {err}", path.display())))
}

pub fn parse_level(level: &str) -> Option<tracing::Level> {
    level.parse().ok()
}

/// Parses a keybind string such as `q`, `?`, `Enter` or `F5`.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        other => other
            .strip_prefix('f')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
    }
}
