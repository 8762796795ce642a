use anyhow::{anyhow, Result};
use chrono::Local;
use clap::Parser;
use tracing::info;

use folio::cli::{formatters, load_holdings, Cli, Commands};
use folio::config::EngineConfig;
use folio::reports;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Commands::Report { file } => {
            let holdings = load_holdings(&file)?;
            info!(count = holdings.len(), "computing portfolio report");
            let report = reports::analyze_portfolio(&holdings, as_of, &config)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", formatters::format_portfolio_table(&report));
            }
            Ok(())
        }

        Commands::Schedule { file, name } => {
            let holdings = load_holdings(&file)?;
            let holding = holdings
                .iter()
                .find(|h| h.name == name)
                .ok_or_else(|| anyhow!("no holding named '{}' in {}", name, file.display()))?;
            let report = reports::analyze_holding(holding, as_of, &config)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", formatters::format_schedule_table(&report));
            }
            Ok(())
        }

        Commands::Xirr { file } => {
            let holdings = load_holdings(&file)?;
            let report = reports::analyze_portfolio(&holdings, as_of, &config)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", formatters::format_xirr_table(&report));
            }
            Ok(())
        }
    }
}
