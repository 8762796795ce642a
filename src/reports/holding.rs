//! Per-holding analysis pipeline
//!
//! Market-priced holdings run through the FIFO lot tracker, get their
//! open lots marked to the supplied quote, and feed the gain classifier.
//! Fixed-income holdings bypass the tracker and accrue instead. Both
//! paths close with an annualized-return solve over the holding's cash
//! flows plus a synthetic terminal valuation. Everything recomputes from
//! the full history on every call; there is no cached state.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accrual::{self, AccrualReport};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::lots::{self, GainRecord, Lot};
use crate::model::{Holding, InstrumentKind, TransactionType};
use crate::tax::{classify_holding, HoldingGains};
use crate::xirr::{self, Xirr};

/// Computed metrics for one holding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingReport {
    pub name: String,
    pub kind: InstrumentKind,
    pub invested: Decimal,
    pub market_value: Decimal,
    pub open_lots: Vec<Lot>,
    pub gains: Vec<GainRecord>,
    pub classified: HoldingGains,
    /// Present only for fixed-income holdings
    pub accrual: Option<AccrualReport>,
    pub annualized_return: Xirr,
}

/// Run the full pipeline for one holding as of a date.
pub fn analyze_holding(
    holding: &Holding,
    as_of: NaiveDate,
    config: &EngineConfig,
) -> Result<HoldingReport> {
    // Lot consumption is order-sensitive; process in trade-date order
    let mut transactions = holding.transactions.clone();
    transactions.sort_by_key(|tx| tx.trade_date);

    let invested = transactions
        .iter()
        .filter(|tx| tx.transaction_type == TransactionType::Buy)
        .fold(Decimal::ZERO, |acc, tx| acc + tx.total_amount.abs());

    if holding.kind.uses_fifo() {
        let current_price = holding.current_price.ok_or_else(|| {
            EngineError::ValidationError(format!(
                "holding '{}' has no current price for unrealized marks",
                holding.name
            ))
        })?;

        let outcome = lots::track(&transactions)?;
        let open_quantity = outcome
            .open_lots
            .iter()
            .fold(Decimal::ZERO, |acc, lot| acc + lot.quantity);
        let market_value = open_quantity * current_price;

        let classified =
            classify_holding(&outcome.gains, &outcome.open_lots, current_price, as_of, config);

        let flows = xirr::build_cash_flows(&transactions, market_value, as_of);
        let annualized_return = xirr::solve(&flows);

        Ok(HoldingReport {
            name: holding.name.clone(),
            kind: holding.kind,
            invested,
            market_value,
            open_lots: outcome.open_lots,
            gains: outcome.gains,
            classified,
            accrual: None,
            annualized_return,
        })
    } else {
        let rate = holding.interest_rate.ok_or_else(|| {
            EngineError::ValidationError(format!(
                "fixed-income holding '{}' has no interest rate",
                holding.name
            ))
        })?;

        let deposits = accrual::deposits_from_transactions(&transactions);
        let report = accrual::accrue(
            holding.kind,
            &deposits,
            rate,
            as_of,
            config.deposit_cutoff_day,
        )?;
        let market_value = report.summary.current_value;

        let flows = xirr::build_cash_flows(&transactions, market_value, as_of);
        let annualized_return = xirr::solve(&flows);

        Ok(HoldingReport {
            name: holding.name.clone(),
            kind: holding.kind,
            invested,
            market_value,
            open_lots: Vec::new(),
            gains: Vec::new(),
            classified: HoldingGains::default(),
            accrual: Some(report),
            annualized_return,
        })
    }
}
