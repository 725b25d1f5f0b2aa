use clap::Subcommand;
use forestfocus_core::Identity;
use serde_json::json;

use crate::context::{print_json, CliResult};

#[derive(Subcommand)]
pub enum WalletAction {
    /// Use this address as the identity for saved progress
    Connect { address: Identity },
    /// Stop saving progress
    Disconnect,
    /// Print the connected address
    Show,
}

pub fn run(action: WalletAction) -> CliResult {
    let mut config = forestfocus_core::Config::load()?;

    match action {
        WalletAction::Connect { address } => {
            config.wallet.address = Some(address.to_string());
            config.save()?;
            print_json(&json!({ "connected": true, "address": address }))?;
        }
        WalletAction::Disconnect => {
            config.wallet.address = None;
            config.save()?;
            print_json(&json!({ "connected": false }))?;
        }
        WalletAction::Show => {
            let identity = config.identity();
            print_json(&json!({
                "connected": identity.is_some(),
                "address": identity,
            }))?;
        }
    }
    Ok(())
}
