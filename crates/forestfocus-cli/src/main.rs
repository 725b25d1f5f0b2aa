use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod context;

#[derive(Parser)]
#[command(
    name = "forestfocus",
    version,
    about = "ForestFocus CLI: focus sessions that grow a forest"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Record focus sessions
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// LeafCoin balance and history
    Coins {
        #[command(subcommand)]
        action: commands::coins::CoinsAction,
    },
    /// Trees grown by focus sessions
    Forest {
        #[command(subcommand)]
        action: commands::forest::ForestAction,
    },
    /// Productivity statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Compose progress posts
    Share {
        #[command(subcommand)]
        action: commands::share::ShareAction,
    },
    /// Wallet identity used to key saved progress
    Wallet {
        #[command(subcommand)]
        action: commands::wallet::WalletAction,
    },
    /// Read or change settings in config.toml
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    // stdout carries JSON; logs go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Coins { action } => commands::coins::run(action),
        Commands::Forest { action } => commands::forest::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Share { action } => commands::share::run(action),
        Commands::Wallet { action } => commands::wallet::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "forestfocus", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
