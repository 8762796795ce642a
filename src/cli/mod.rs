use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::error::{EngineError, Result};
use crate::model::Holding;

pub mod formatters;

#[derive(Debug, Parser)]
#[command(name = "folio")]
#[command(version, about = "Personal portfolio metrics: XIRR, accrual schedules, capital gains")]
#[command(
    long_about = "Compute derived metrics for a personal investment portfolio from a raw \
transaction log: annualized returns for irregular cash flows, fixed-income accrual \
schedules with financial-year crediting, FIFO realized/unrealized gains, and \
capital-gains tax estimates."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output results in JSON format
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Path to a TOML config file (tax rates, exemption, calendar rules)
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Valuation date (defaults to today)
    #[arg(long = "as-of", global = true, value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Full portfolio report: values, gains, tax estimate
    Report {
        /// Path to the holdings JSON file
        file: PathBuf,
    },

    /// Financial-year accrual schedule for one fixed-income holding
    Schedule {
        /// Path to the holdings JSON file
        file: PathBuf,

        /// Holding name as it appears in the file
        name: String,
    },

    /// Annualized return per holding and portfolio-wide
    Xirr {
        /// Path to the holdings JSON file
        file: PathBuf,
    },
}

/// Fail fast on malformed dates at the boundary instead of letting them
/// reach downstream arithmetic.
fn parse_as_of(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(s.to_string()).to_string())
}

/// Load the validated holdings list supplied by the caller.
pub fn load_holdings(path: &Path) -> Result<Vec<Holding>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read holdings file {}", path.display()))?;
    let holdings: Vec<Holding> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse holdings file {}", path.display()))?;
    Ok(holdings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_report_command() {
        let cli = Cli::try_parse_from(["folio", "report", "portfolio.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Report { .. }));
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_parses_as_of_date() {
        let cli =
            Cli::try_parse_from(["folio", "--as-of", "2024-03-31", "xirr", "p.json"]).unwrap();
        assert_eq!(cli.as_of, NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        // Malformed dates must fail at the boundary, not propagate inward
        let result = Cli::try_parse_from(["folio", "--as-of", "2024-13-40", "xirr", "p.json"]);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid date"));
    }

    #[test]
    fn test_load_holdings_round_trip() {
        let json = r#"[
            {
                "name": "INFY",
                "kind": "Equity",
                "transactions": [
                    {
                        "transaction_type": "Buy",
                        "trade_date": "2023-01-01",
                        "quantity": "10",
                        "price_per_unit": "100",
                        "total_amount": "1000"
                    }
                ],
                "current_price": "150"
            }
        ]"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("holdings.json");
        std::fs::write(&path, json).unwrap();

        let holdings = load_holdings(&path).unwrap();
        assert_eq!(holdings.len(), 1);
        assert_eq!(holdings[0].name, "INFY");
        assert_eq!(holdings[0].transactions.len(), 1);
    }
}
