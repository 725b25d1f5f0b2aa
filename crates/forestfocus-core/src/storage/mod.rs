mod config;
pub mod kv;
pub mod profile;

pub use config::{Config, GrowthConfig, NotificationsConfig, TimerConfig, WalletConfig};
pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
pub use profile::{Identity, ProfileSnapshot, ProfileStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding `config.toml` and `forestfocus.db`.
///
/// `FORESTFOCUS_HOME` wins when set. Otherwise `~/.config/forestfocus`, or
/// `~/.config/forestfocus-dev` when `FORESTFOCUS_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FORESTFOCUS_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FORESTFOCUS_ENV").unwrap_or_default();
            if env == "dev" {
                base_dir.join("forestfocus-dev")
            } else {
                base_dir.join("forestfocus")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
