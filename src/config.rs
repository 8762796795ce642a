//! Engine configuration
//!
//! Tax rates, the exemption allowance and calendar conventions are policy,
//! not engine logic, so they load from a TOML file and default to current
//! Indian capital-gains rules when no file is supplied.

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;

/// Externally configurable constants consumed by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Holding periods strictly greater than this are long-term
    #[serde(default = "default_long_term_threshold_days")]
    pub long_term_threshold_days: i64,

    /// Flat tax rate on taxable long-term gains (fraction)
    #[serde(default = "default_long_term_rate")]
    pub long_term_rate: Decimal,

    /// Flat tax rate on short-term gains (fraction)
    #[serde(default = "default_short_term_rate")]
    pub short_term_rate: Decimal,

    /// Annual long-term gain amount excluded from tax
    #[serde(default = "default_exemption_allowance")]
    pub exemption_allowance: Decimal,

    /// Deposits on or before this day of the month accrue interest from
    /// that month; later deposits start the following month
    #[serde(default = "default_deposit_cutoff_day")]
    pub deposit_cutoff_day: u32,
}

fn default_long_term_threshold_days() -> i64 {
    365
}

fn default_long_term_rate() -> Decimal {
    Decimal::from_str("0.125").unwrap_or(Decimal::ZERO)
}

fn default_short_term_rate() -> Decimal {
    Decimal::from_str("0.20").unwrap_or(Decimal::ZERO)
}

fn default_exemption_allowance() -> Decimal {
    Decimal::from(125_000)
}

fn default_deposit_cutoff_day() -> u32 {
    5
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            long_term_threshold_days: default_long_term_threshold_days(),
            long_term_rate: default_long_term_rate(),
            short_term_rate: default_short_term_rate(),
            exemption_allowance: default_exemption_allowance(),
            deposit_cutoff_day: default_deposit_cutoff_day(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file. Missing keys fall back to
    /// defaults; a missing file is an error (callers pass None for defaults).
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: EngineConfig = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}
