mod cli;
mod config;
mod models;
mod services;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::Settings;

#[derive(Parser)]
#[command(name = "roundtable")]
#[command(about = "Rebuilds a football league's standings round by round for trend analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect all configured seasons (cache-first) and export every CSV
    Collect,
    /// Rebuild round-by-round standings from cached data only
    Rounds,
    /// Populate the cache for a single season
    Fetch {
        #[arg(short, long)]
        season: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.command {
        Some(Commands::Rounds) => {
            tracing::info!("Rebuilding standings from cache");
            cli::rounds(&settings)?;
        }
        Some(Commands::Fetch { season }) => {
            tracing::info!("Fetching season {} into the cache", season);
            cli::fetch_season(&settings, season).await?;
        }
        Some(Commands::Collect) | None => {
            // Default to a full collection run
            tracing::info!("Collecting seasons {:?}", settings.seasons);
            cli::collect(&settings).await?;
        }
    }

    Ok(())
}
