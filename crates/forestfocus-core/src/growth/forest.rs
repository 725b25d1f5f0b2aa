use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{GrowthThresholds, Stage, Tree};

/// A tree that moved to a later stage during `grow_trees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageChange {
    pub tree_id: String,
    pub from: Stage,
    pub to: Stage,
}

/// Per-stage counts and the share of trees past the seedling stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForestSummary {
    pub seedlings: usize,
    pub saplings: usize,
    pub trees: usize,
    pub total: usize,
    /// Percent of trees that are saplings or fully grown.
    pub growth_rate: f64,
}

/// The tree collection of one profile, in planting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn get(&self, id: &str) -> Option<&Tree> {
        self.trees.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Append a seedling named after its position in the forest.
    pub fn plant_tree(&mut self, at: DateTime<Utc>) -> &Tree {
        let name = format!("Tree {}", self.trees.len() + 1);
        self.trees.push(Tree::seedling(at, Some(name)));
        let tree = &self.trees[self.trees.len() - 1];
        info!(tree_id = %tree.id, "tree planted");
        tree
    }

    /// One session of growth for every tree. Returns the trees that advanced.
    pub fn grow_trees(&mut self, thresholds: &GrowthThresholds) -> Vec<StageChange> {
        let mut changes = Vec::new();
        for tree in &mut self.trees {
            if let Some(from) = tree.grow(thresholds) {
                info!(tree_id = %tree.id, %from, to = %tree.stage, "tree advanced");
                changes.push(StageChange {
                    tree_id: tree.id.clone(),
                    from,
                    to: tree.stage,
                });
            }
        }
        changes
    }

    pub fn count(&self, stage: Stage) -> usize {
        self.trees.iter().filter(|t| t.stage == stage).count()
    }

    pub fn summary(&self) -> ForestSummary {
        let seedlings = self.count(Stage::Seedling);
        let saplings = self.count(Stage::Sapling);
        let trees = self.count(Stage::Tree);
        let total = self.trees.len();
        let growth_rate = if total > 0 {
            (saplings + trees) as f64 * 100.0 / total as f64
        } else {
            0.0
        };
        ForestSummary {
            seedlings,
            saplings,
            trees,
            total,
            growth_rate,
        }
    }
}
