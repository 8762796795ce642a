//! Long-term / short-term gain classification and tax estimation
//!
//! Consumes gain records from the lot tracker and open lots marked to an
//! externally supplied price. Holding periods strictly greater than the
//! configured threshold are long-term. The annual exemption allowance
//! reduces the realized long-term bucket before the flat rates apply.
//! No gains are computed here; this is bucketing and thresholds only.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::lots::{GainRecord, Lot};

/// Tax bucket for one gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GainTerm {
    LongTerm,
    ShortTerm,
}

impl GainTerm {
    /// Strictly-greater-than comparison: exactly at the threshold is
    /// still short-term.
    pub fn from_holding_period(days: i64, config: &EngineConfig) -> Self {
        if days > config.long_term_threshold_days {
            GainTerm::LongTerm
        } else {
            GainTerm::ShortTerm
        }
    }
}

/// Per-holding classified gains, realized and marked-to-market
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingGains {
    pub realized_long_term: Decimal,
    pub realized_short_term: Decimal,
    pub unrealized_long_term: Decimal,
    pub unrealized_short_term: Decimal,
}

impl HoldingGains {
    pub fn total_realized(&self) -> Decimal {
        self.realized_long_term + self.realized_short_term
    }

    pub fn total_unrealized(&self) -> Decimal {
        self.unrealized_long_term + self.unrealized_short_term
    }
}

/// Portfolio-wide tax estimate over realized gains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSummary {
    pub total_long_term_gain: Decimal,
    pub total_short_term_gain: Decimal,
    pub exemption_applied: Decimal,
    pub taxable_long_term: Decimal,
    pub taxable_short_term: Decimal,
    pub long_term_tax: Decimal,
    pub short_term_tax: Decimal,
    pub total_tax: Decimal,
}

/// Bucket one holding's realized records and open-lot marks.
pub fn classify_holding(
    gains: &[GainRecord],
    open_lots: &[Lot],
    current_price: Decimal,
    as_of: NaiveDate,
    config: &EngineConfig,
) -> HoldingGains {
    let mut result = HoldingGains::default();

    for record in gains {
        match GainTerm::from_holding_period(record.holding_period_days, config) {
            GainTerm::LongTerm => result.realized_long_term += record.realized_amount,
            GainTerm::ShortTerm => result.realized_short_term += record.realized_amount,
        }
    }

    for lot in open_lots {
        let held_days = (as_of - lot.acquisition_date).num_days();
        let mark = lot.quantity * (current_price - lot.unit_cost);
        match GainTerm::from_holding_period(held_days, config) {
            GainTerm::LongTerm => result.unrealized_long_term += mark,
            GainTerm::ShortTerm => result.unrealized_short_term += mark,
        }
    }

    result
}

/// Aggregate realized gains portfolio-wide, apply the exemption allowance
/// to the long-term bucket and the flat rates per bucket.
pub fn summarize_portfolio(holdings: &[HoldingGains], config: &EngineConfig) -> TaxSummary {
    let total_long_term_gain = holdings
        .iter()
        .fold(Decimal::ZERO, |acc, h| acc + h.realized_long_term);
    let total_short_term_gain = holdings
        .iter()
        .fold(Decimal::ZERO, |acc, h| acc + h.realized_short_term);

    // Losses leave nothing taxable and consume no exemption
    let exemption_applied = total_long_term_gain
        .max(Decimal::ZERO)
        .min(config.exemption_allowance);
    let taxable_long_term = (total_long_term_gain - config.exemption_allowance).max(Decimal::ZERO);
    let taxable_short_term = total_short_term_gain.max(Decimal::ZERO);

    let long_term_tax = taxable_long_term * config.long_term_rate;
    let short_term_tax = taxable_short_term * config.short_term_rate;

    TaxSummary {
        total_long_term_gain,
        total_short_term_gain,
        exemption_applied,
        taxable_long_term,
        taxable_short_term,
        long_term_tax,
        short_term_tax,
        total_tax: long_term_tax + short_term_tax,
    }
}
