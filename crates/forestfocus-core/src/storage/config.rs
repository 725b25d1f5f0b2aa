//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Interval lengths and the long-break cadence
//! - Tree growth thresholds
//! - LeafCoin reward amounts
//! - Completion chime
//! - The connected wallet address
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use super::profile::Identity;
use crate::error::ConfigError;
use crate::growth::GrowthThresholds;
use crate::rewards::CoinRewards;
use crate::session::SessionRules;
use crate::timer::TimerSettings;

/// Interval lengths in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_focus_min")]
    pub focus_min: u32,
    #[serde(default = "default_short_break_min")]
    pub short_break_min: u32,
    #[serde(default = "default_long_break_min")]
    pub long_break_min: u32,
    /// Every n-th focus session is followed by a long break.
    #[serde(default = "default_long_break_every")]
    pub long_break_every: u32,
    /// Seconds a completed interval stays on screen before returning to idle.
    #[serde(default = "default_auto_reset_secs")]
    pub auto_reset_secs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthConfig {
    #[serde(default = "default_sapling_at")]
    pub sapling_at: u32,
    #[serde(default = "default_tree_at")]
    pub tree_at: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub chime: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub growth: GrowthConfig,
    #[serde(default)]
    pub rewards: CoinRewards,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
}

// Default functions
fn default_focus_min() -> u32 {
    25
}
fn default_short_break_min() -> u32 {
    5
}
fn default_long_break_min() -> u32 {
    15
}
fn default_long_break_every() -> u32 {
    4
}
fn default_auto_reset_secs() -> u32 {
    3
}
fn default_sapling_at() -> u32 {
    GrowthThresholds::STANDARD.sapling_at
}
fn default_tree_at() -> u32 {
    GrowthThresholds::STANDARD.tree_at
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_min: default_focus_min(),
            short_break_min: default_short_break_min(),
            long_break_min: default_long_break_min(),
            long_break_every: default_long_break_every(),
            auto_reset_secs: default_auto_reset_secs(),
        }
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            sapling_at: default_sapling_at(),
            tree_at: default_tree_at(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            chime: default_true(),
        }
    }
}

impl Config {
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if part.is_empty() {
                return Err(unknown());
            }
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(format!("'{value}': {e}")))?,
                ),
                serde_json::Value::Number(_) => {
                    let n = value
                        .parse::<u64>()
                        .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?;
                    serde_json::Value::Number(n.into())
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                serde_json::Value::Null if value.is_empty() => serde_json::Value::Null,
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or create the default file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds values that [`apply`](Self::apply) would refuse, or if the
    /// default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.validate().map_err(load_failed)?;
                Ok(cfg)
            }
            Err(_) => {
                debug!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match Self::get_json_value_by_path(&json, key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Change one value in memory. The config is left untouched when the
    /// key is unknown, the value does not parse, or the result is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] or [`ConfigError::InvalidValue`].
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate().map_err(|message| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        })?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// or is out of range, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    fn validate(&self) -> Result<(), String> {
        if !self.growth_thresholds().is_valid() {
            return Err(format!(
                "growth thresholds need 0 < sapling_at < tree_at (got {} and {})",
                self.growth.sapling_at, self.growth.tree_at
            ));
        }
        let t = &self.timer;
        if t.focus_min == 0 || t.short_break_min == 0 || t.long_break_min == 0 {
            return Err("interval lengths must be at least one minute".to_string());
        }
        if t.long_break_every == 0 {
            return Err("long_break_every must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn timer_settings(&self) -> TimerSettings {
        TimerSettings {
            focus_secs: u64::from(self.timer.focus_min) * 60,
            short_break_secs: u64::from(self.timer.short_break_min) * 60,
            long_break_secs: u64::from(self.timer.long_break_min) * 60,
            long_break_every: self.timer.long_break_every,
            auto_reset_secs: u64::from(self.timer.auto_reset_secs),
        }
    }

    pub fn growth_thresholds(&self) -> GrowthThresholds {
        GrowthThresholds {
            sapling_at: self.growth.sapling_at,
            tree_at: self.growth.tree_at,
        }
    }

    pub fn session_rules(&self) -> SessionRules {
        SessionRules {
            rewards: self.rewards,
            thresholds: self.growth_thresholds(),
            focus_minutes: self.timer.focus_min,
            ..SessionRules::default()
        }
    }

    /// The connected wallet, if any. A blank address counts as none.
    pub fn identity(&self) -> Option<Identity> {
        self.wallet
            .address
            .as_deref()
            .and_then(|address| Identity::new(address).ok())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
