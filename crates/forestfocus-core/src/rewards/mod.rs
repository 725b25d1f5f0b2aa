//! LeafCoin rewards.
//!
//! The ledger records every coin movement; `CoinRewards` says how many
//! coins each achievement is worth.

mod ledger;

pub use ledger::{RewardLedger, RewardTransaction, TransactionKind};

use serde::{Deserialize, Serialize};

/// Coins awarded per achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRewards {
    #[serde(default = "default_focus_session")]
    pub focus_session: u32,
    #[serde(default = "default_streak_bonus")]
    pub streak_bonus: u32,
    #[serde(default = "default_tree_growth")]
    pub tree_growth: u32,
    #[serde(default = "default_tree_planted")]
    pub tree_planted: u32,
    #[serde(default = "default_daily_goal")]
    pub daily_goal: u32,
    #[serde(default = "default_weekly_goal")]
    pub weekly_goal: u32,
}

fn default_focus_session() -> u32 {
    10
}
fn default_streak_bonus() -> u32 {
    5
}
fn default_tree_growth() -> u32 {
    15
}
fn default_tree_planted() -> u32 {
    15
}
fn default_daily_goal() -> u32 {
    25
}
fn default_weekly_goal() -> u32 {
    50
}

impl Default for CoinRewards {
    fn default() -> Self {
        Self {
            focus_session: default_focus_session(),
            streak_bonus: default_streak_bonus(),
            tree_growth: default_tree_growth(),
            tree_planted: default_tree_planted(),
            daily_goal: default_daily_goal(),
            weekly_goal: default_weekly_goal(),
        }
    }
}
