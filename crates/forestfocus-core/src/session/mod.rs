//! Session orchestration.
//!
//! Turns a completed focus session into coins, streak and goal bonuses,
//! and tree planting or growth, then persists the profile.

mod orchestrator;

pub use orchestrator::SessionOrchestrator;

use serde::{Deserialize, Serialize};

use crate::growth::{GrowthThresholds, StageChange, Tree};
use crate::rewards::CoinRewards;

/// Aggregate counters for one identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub total_sessions: u32,
    /// Mirrors the ledger balance.
    #[serde(default)]
    pub leaf_coins: i64,
    #[serde(default)]
    pub trees_planted: u32,
    /// Distinct calendar days with at least one focus session.
    #[serde(default)]
    pub current_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AwardKind {
    FocusSession,
    StreakBonus,
    DailyGoal,
    WeeklyGoal,
    TreePlanted,
    TreeGrowth,
}

/// One ledger credit made during a session step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub kind: AwardKind,
    pub amount: u32,
    pub reason: String,
}

/// Amounts and cadences applied on each focus completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRules {
    pub rewards: CoinRewards,
    pub thresholds: GrowthThresholds,
    /// A tree is planted every `plant_every` sessions; other sessions grow
    /// the forest.
    pub plant_every: u32,
    pub daily_goal_every: u32,
    pub weekly_goal_every: u32,
    /// Streak lengths that are a multiple of this earn the streak bonus.
    pub streak_bonus_every: u32,
    /// Minutes recorded in the session log per focus session.
    pub focus_minutes: u32,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            rewards: CoinRewards::default(),
            thresholds: GrowthThresholds::STANDARD,
            plant_every: 4,
            daily_goal_every: 4,
            weekly_goal_every: 20,
            streak_bonus_every: 3,
            focus_minutes: 25,
        }
    }
}

/// What one focus completion produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub total_sessions: u32,
    pub current_streak: u32,
    pub awards: Vec<Award>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planted: Option<Tree>,
    pub stage_changes: Vec<StageChange>,
    /// Coin balance after the step.
    pub balance: i64,
    /// False when the profile could not be written (or there is no identity).
    pub persisted: bool,
}

impl SessionOutcome {
    pub fn coins_awarded(&self) -> u32 {
        self.awards.iter().map(|a| a.amount).sum()
    }
}

/// True when `n` is a positive multiple of `every`. A zero cadence never fires.
pub(crate) fn is_multiple(n: u32, every: u32) -> bool {
    every > 0 && n > 0 && n % every == 0
}
