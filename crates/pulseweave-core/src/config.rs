//! TOML-based application configuration.
//!
//! Stores the playback tunables:
//! - Inter-cycle pause length
//! - Random pattern generation ranges and optional RNG seed
//! - Indicator frame interval and intensity adjustment step
//!
//! Configuration is stored at `~/.config/pulseweave/config.toml`;
//! `PULSEWEAVE_CONFIG_DIR` overrides the directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::indicator::DEFAULT_TICK_MS;
use crate::pattern::RandomSpec;
use crate::player::DEFAULT_CYCLE_PAUSE_MS;

/// Playback pacing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Pause between full runs of a sequence, in milliseconds.
    #[serde(default = "default_cycle_pause_ms")]
    pub cycle_pause_ms: u64,
}

/// Random pattern generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomConfig {
    #[serde(default = "default_random_length")]
    pub length: usize,
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,
    #[serde(default = "default_max_duration_ms")]
    pub max_duration_ms: u64,
    #[serde(default = "default_min_amplitude")]
    pub min_amplitude: u16,
    #[serde(default = "default_max_amplitude")]
    pub max_amplitude: u16,
    /// RNG seed for reproducible random patterns (None = random).
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Spinner frame interval, in milliseconds.
    #[serde(default = "default_indicator_tick_ms")]
    pub indicator_tick_ms: u64,
    /// Intensity change per discrete adjust input.
    #[serde(default = "default_intensity_step")]
    pub intensity_step: f32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pulseweave/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub random: RandomConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

// Default functions
fn default_cycle_pause_ms() -> u64 {
    DEFAULT_CYCLE_PAUSE_MS
}
fn default_random_length() -> usize {
    12
}
fn default_min_duration_ms() -> u64 {
    20
}
fn default_max_duration_ms() -> u64 {
    500
}
fn default_min_amplitude() -> u16 {
    30
}
fn default_max_amplitude() -> u16 {
    500
}
fn default_indicator_tick_ms() -> u64 {
    DEFAULT_TICK_MS
}
fn default_intensity_step() -> f32 {
    0.05
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            cycle_pause_ms: default_cycle_pause_ms(),
        }
    }
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            length: default_random_length(),
            min_duration_ms: default_min_duration_ms(),
            max_duration_ms: default_max_duration_ms(),
            min_amplitude: default_min_amplitude(),
            max_amplitude: default_max_amplitude(),
            seed: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            indicator_tick_ms: default_indicator_tick_ms(),
            intensity_step: default_intensity_step(),
        }
    }
}

impl RandomConfig {
    /// The generation spec for the catalog's primary random provider.
    pub fn spec(&self) -> RandomSpec {
        RandomSpec {
            length: self.length,
            min_duration_ms: self.min_duration_ms,
            max_duration_ms: self.max_duration_ms,
            min_amplitude: self.min_amplitude,
            max_amplitude: self.max_amplitude,
        }
    }
}

/// Directory holding the config file, created on demand.
pub fn config_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("PULSEWEAVE_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pulseweave"),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

impl Config {
    fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns error if the key is
    /// unknown or the value does not parse as the existing type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }
    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| ConfigError::ParseFailed(e.to_string()))?,
                ),
                serde_json::Value::Number(_) | serde_json::Value::Null => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| {
                                ConfigError::ParseFailed(format!("cannot parse '{value}' as number"))
                            })?
                    } else {
                        return Err(ConfigError::ParseFailed(format!(
                            "cannot parse '{value}' as number"
                        )));
                    }
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current
            .get_mut(part)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    }

    Err(ConfigError::UnknownKey(key.to_string()))
}
