//! Portfolio-wide aggregation
//!
//! Collects per-holding reports, sums invested and market values,
//! estimates tax over the combined realized gains (the exemption
//! allowance applies once, portfolio-wide), and solves one XIRR over the
//! union of every holding's cash flows with a single terminal valuation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::model::Holding;
use crate::tax::{summarize_portfolio, TaxSummary};
use crate::xirr::{self, CashFlow, Xirr};

use super::holding::{analyze_holding, HoldingReport};

/// Computed metrics for a whole portfolio as of a date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub as_of: NaiveDate,
    pub holdings: Vec<HoldingReport>,
    pub total_invested: Decimal,
    pub total_market_value: Decimal,
    pub tax: TaxSummary,
    pub annualized_return: Xirr,
}

/// Analyze every holding and aggregate.
pub fn analyze_portfolio(
    holdings: &[Holding],
    as_of: NaiveDate,
    config: &EngineConfig,
) -> Result<PortfolioReport> {
    debug!(count = holdings.len(), %as_of, "analyzing portfolio");

    let mut reports = Vec::with_capacity(holdings.len());
    let mut flows: Vec<CashFlow> = Vec::new();

    for holding in holdings {
        // Holding flows without their own terminal; the portfolio closes
        // with one combined terminal valuation below
        flows.extend(xirr::build_cash_flows(
            &holding.transactions,
            Decimal::ZERO,
            as_of,
        ));
        reports.push(analyze_holding(holding, as_of, config)?);
    }

    let total_invested = reports
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc + r.invested);
    let total_market_value = reports
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc + r.market_value);

    if total_market_value > Decimal::ZERO {
        flows.push(CashFlow {
            date: as_of,
            amount: total_market_value,
        });
    }
    let annualized_return = xirr::solve(&flows);

    let classified: Vec<_> = reports.iter().map(|r| r.classified.clone()).collect();
    let tax = summarize_portfolio(&classified, config);

    Ok(PortfolioReport {
        as_of,
        holdings: reports,
        total_invested,
        total_market_value,
        tax,
        annualized_return,
    })
}
