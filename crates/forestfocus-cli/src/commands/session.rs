use clap::Subcommand;

use crate::context::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record a completed focus session without running the timer
    Complete,
}

pub fn run(action: SessionAction) -> CliResult {
    let ctx = Context::open()?;
    let mut orchestrator = ctx.orchestrator();

    match action {
        SessionAction::Complete => {
            let outcome = orchestrator.complete_focus_session();
            print_json(&outcome)?;
        }
    }
    Ok(())
}
