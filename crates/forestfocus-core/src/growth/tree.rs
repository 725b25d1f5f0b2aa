use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GrowthThresholds, Stage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
    pub id: String,
    pub stage: Stage,
    pub planted_at: DateTime<Utc>,
    pub completed_sessions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Tree {
    /// A fresh seedling with no sessions.
    pub fn seedling(planted_at: DateTime<Utc>, name: Option<String>) -> Self {
        Self {
            id: format!("tree-{}", Uuid::new_v4()),
            stage: Stage::Seedling,
            planted_at,
            completed_sessions: 0,
            name,
        }
    }

    /// Count one more session and recompute the stage.
    ///
    /// Returns the previous stage when the tree advanced.
    pub fn grow(&mut self, thresholds: &GrowthThresholds) -> Option<Stage> {
        self.completed_sessions = self.completed_sessions.saturating_add(1);
        let previous = self.stage;
        // Never regress, even if the thresholds were raised since planting.
        self.stage = previous.max(thresholds.stage_for(self.completed_sessions));
        (self.stage != previous).then_some(previous)
    }

    /// Percent of the way from the current stage to the next, 0..=100.
    pub fn progress_pct(&self, thresholds: &GrowthThresholds) -> f64 {
        let Some(next) = GrowthThresholds::next_stage(self.stage) else {
            return 100.0;
        };
        let current = thresholds.threshold(self.stage) as f64;
        let target = thresholds.threshold(next) as f64;
        if target <= current {
            return 100.0;
        }
        ((self.completed_sessions as f64 - current) * 100.0 / (target - current)).clamp(0.0, 100.0)
    }

    /// Sessions still needed to reach the next stage; `None` once fully grown.
    pub fn sessions_to_next_stage(&self, thresholds: &GrowthThresholds) -> Option<u32> {
        let next = GrowthThresholds::next_stage(self.stage)?;
        Some(thresholds.threshold(next).saturating_sub(self.completed_sessions))
    }

    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => {
                let skip = self.id.chars().count().saturating_sub(4);
                let tail: String = self.id.chars().skip(skip).collect();
                format!("Tree {tail}")
            }
        }
    }
}
