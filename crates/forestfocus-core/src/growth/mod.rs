//! Tree growth simulation.
//!
//! Each tree counts the focus sessions completed since it was planted and
//! moves through three stages as that count crosses fixed thresholds.

mod forest;
mod tree;

pub use forest::{Forest, ForestSummary, StageChange};
pub use tree::Tree;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle position of a tree. Ordered: a later stage compares greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Seedling,
    Sapling,
    Tree,
}

impl Stage {
    pub fn emoji(self) -> &'static str {
        match self {
            Stage::Seedling => "🌱",
            Stage::Sapling => "🌿",
            Stage::Tree => "🌳",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Seedling => "seedling",
            Stage::Sapling => "sapling",
            Stage::Tree => "tree",
        };
        f.write_str(name)
    }
}

/// Session counts at which a tree reaches each stage. Seedling is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthThresholds {
    pub sapling_at: u32,
    pub tree_at: u32,
}

impl GrowthThresholds {
    /// The table the growth view uses: sapling at 3, tree at 8.
    pub const STANDARD: Self = Self {
        sapling_at: 3,
        tree_at: 8,
    };

    /// The slower table used by per-tree growth in the session handler.
    pub const SLOW: Self = Self {
        sapling_at: 4,
        tree_at: 12,
    };

    /// Sapling must come after 0 and before tree.
    pub fn is_valid(&self) -> bool {
        self.sapling_at > 0 && self.tree_at > self.sapling_at
    }

    /// Highest stage whose threshold does not exceed `sessions`.
    pub fn stage_for(&self, sessions: u32) -> Stage {
        if sessions >= self.tree_at {
            Stage::Tree
        } else if sessions >= self.sapling_at {
            Stage::Sapling
        } else {
            Stage::Seedling
        }
    }

    pub fn threshold(&self, stage: Stage) -> u32 {
        match stage {
            Stage::Seedling => 0,
            Stage::Sapling => self.sapling_at,
            Stage::Tree => self.tree_at,
        }
    }

    pub fn next_stage(stage: Stage) -> Option<Stage> {
        match stage {
            Stage::Seedling => Some(Stage::Sapling),
            Stage::Sapling => Some(Stage::Tree),
            Stage::Tree => None,
        }
    }
}

impl Default for GrowthThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}
