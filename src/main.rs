use anniversary::cli::{Cli, Commands};
use anniversary::clock::SystemClock;
use anniversary::config::TrackerConfig;
use anniversary::elapsed::Calculator;
use anniversary::snapshot::Snapshot;
use anniversary::{logging, presenter, svg};
use anyhow::{Context, Result};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = logging::init_logging(cli.log_level())?;

    let config = TrackerConfig::default();
    let clock = SystemClock;

    match cli.command() {
        Commands::Live => {
            presenter::run_live(&config, &clock).await?;
        }
        Commands::Card { out_dir } => {
            let snapshot = Snapshot::take(&Calculator::new(config.start), &clock);
            let written = svg::write_cards(&snapshot, &out_dir)?;

            let names: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            println!("Generated {} successfully.", names.join(" and "));
        }
        Commands::Json { pretty } => {
            let snapshot = Snapshot::take(&Calculator::new(config.start), &clock);
            let json = if pretty {
                serde_json::to_string_pretty(&snapshot)
            } else {
                serde_json::to_string(&snapshot)
            }
            .context("Failed to serialize snapshot")?;

            println!("{json}");
        }
    }

    Ok(())
}
