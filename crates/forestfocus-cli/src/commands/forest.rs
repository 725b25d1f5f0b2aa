use clap::Subcommand;
use serde_json::json;

use crate::context::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum ForestAction {
    /// Every tree with its stage and growth progress
    List,
    /// Per-stage counts
    Summary,
}

pub fn run(action: ForestAction) -> CliResult {
    let ctx = Context::open()?;
    let orchestrator = ctx.orchestrator();
    let forest = orchestrator.forest();
    let thresholds = orchestrator.rules().thresholds;

    match action {
        ForestAction::List => {
            let trees: Vec<_> = forest
                .trees()
                .iter()
                .map(|tree| {
                    json!({
                        "id": tree.id,
                        "name": tree.display_name(),
                        "stage": tree.stage,
                        "emoji": tree.stage.emoji(),
                        "completedSessions": tree.completed_sessions,
                        "plantedAt": tree.planted_at,
                        "progressPct": tree.progress_pct(&thresholds),
                        "sessionsToNextStage": tree.sessions_to_next_stage(&thresholds),
                    })
                })
                .collect();
            print_json(&trees)?;
        }
        ForestAction::Summary => print_json(&forest.summary())?,
    }
    Ok(())
}
