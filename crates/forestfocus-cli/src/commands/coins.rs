use chrono::{Local, Utc};
use clap::Subcommand;
use serde_json::json;

use crate::context::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum CoinsAction {
    /// Current LeafCoin balance
    Balance,
    /// Most recent transactions, newest first
    History {
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },
    /// Coins earned today and over the last seven days
    Earnings,
    /// Spend coins if the balance covers it
    Spend {
        amount: u32,
        reason: String,
    },
}

pub fn run(action: CoinsAction) -> CliResult {
    let ctx = Context::open()?;
    let mut orchestrator = ctx.orchestrator();

    match action {
        CoinsAction::Balance => {
            print_json(&json!({
                "balance": orchestrator.ledger().balance(),
                "transactions": orchestrator.ledger().len(),
            }))?;
        }
        CoinsAction::History { count } => {
            print_json(&orchestrator.ledger().recent_transactions(count))?;
        }
        CoinsAction::Earnings => {
            let ledger = orchestrator.ledger();
            print_json(&json!({
                "today": ledger.earnings_today(&Local::now()),
                "week": ledger.earnings_this_week(Utc::now()),
            }))?;
        }
        CoinsAction::Spend { amount, reason } => {
            let balance = orchestrator.ledger().balance();
            if !orchestrator.spend_coins(amount, reason.as_str()) {
                return Err(format!("not enough LeafCoins: need {amount}, have {balance}").into());
            }
            print_json(&json!({
                "spent": amount,
                "reason": reason,
                "balance": orchestrator.ledger().balance(),
            }))?;
        }
    }
    Ok(())
}
