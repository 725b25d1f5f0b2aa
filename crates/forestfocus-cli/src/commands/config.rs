use clap::Subcommand;
use forestfocus_core::Config;
use serde_json::json;

use crate::context::{print_json, CliResult};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting, addressed as section.field
    Get {
        /// e.g. "timer.focus_min", "growth.tree_at", "rewards.daily_goal"
        key: String,
    },
    /// Change one setting; values that break the growth or timer rules are refused
    Set { key: String, value: String },
    /// Print every setting as JSON
    List,
    /// Overwrite config.toml with the default settings
    ///
    /// Works even when the current file no longer loads.
    Reset,
}

pub fn run(action: ConfigAction) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or_else(|| format!("no setting named {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            print_json(&json!({ "key": key, "value": config.get(&key) }))?;
        }
        ConfigAction::List => print_json(&Config::load()?)?,
        ConfigAction::Reset => {
            let defaults = Config::default();
            defaults.save()?;
            print_json(&defaults)?;
        }
    }
    Ok(())
}
