use chrono::Local;
use clap::Subcommand;
use forestfocus_core::{ProductivityAnalyzer, ReportRange};
use serde_json::json;

use crate::context::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Profile totals
    Show,
    /// Productivity over a time range
    Report {
        #[arg(long, default_value = "week")]
        range: ReportRange,
    },
}

pub fn run(action: StatsAction) -> CliResult {
    let ctx = Context::open()?;
    let orchestrator = ctx.orchestrator();

    match action {
        StatsAction::Show => {
            print_json(&json!({
                "identity": orchestrator.identity().map(|id| id.as_str()),
                "stats": orchestrator.stats(),
                "lastSessionDate": orchestrator.last_session_date(),
                "forest": orchestrator.forest().summary(),
            }))?;
        }
        StatsAction::Report { range } => {
            let now = Local::now();
            let analyzer = ProductivityAnalyzer::new(orchestrator.sessions());
            print_json(&json!({
                "report": analyzer.report(range, &now),
                "lastSevenDays": analyzer.last_seven_days(&now),
                "mostProductiveWeekday": analyzer.most_productive_weekday(&Local),
                "forest": orchestrator.forest().summary(),
            }))?;
        }
    }
    Ok(())
}
