//! Annualized internal rate of return for irregular cash flows (XIRR)
//!
//! The solver finds the rate `r` such that the net present value of all
//! cash flows discounted at `(1 + r)^(days/365)` is zero, via
//! Newton-Raphson. Money stays in Decimal at the interface; the iteration
//! itself runs in f64 because it needs fractional powers.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{Transaction, TransactionType};

const INITIAL_GUESS: f64 = 0.10;
const MAX_ITERATIONS: usize = 100;
const NPV_TOLERANCE: f64 = 1e-7;
const RATE_TOLERANCE: f64 = 1e-9;
const DERIVATIVE_EPSILON: f64 = 1e-10;

/// A dated signed cash flow: negative = money out (buys), positive =
/// money in (sells, terminal valuation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Solver outcome. Callers that only want a number use [`Xirr::rate`];
/// callers that care about reliability match on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Xirr {
    /// Fewer than two cash flows; the rate sentinel is zero
    NotComputable,
    /// NPV (or the rate step) fell within tolerance
    Converged(Decimal),
    /// Best-effort estimate: the iteration cap was hit, or the derivative
    /// went degenerate before convergence
    MaxIterationsExceeded(Decimal),
}

impl Xirr {
    pub fn rate(&self) -> Decimal {
        match self {
            Xirr::NotComputable => Decimal::ZERO,
            Xirr::Converged(rate) | Xirr::MaxIterationsExceeded(rate) => *rate,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, Xirr::Converged(_))
    }
}

/// Build the signed cash-flow series for a holding: buys are outflows,
/// sells are inflows, and the current valuation closes the series as a
/// synthetic inflow on the as-of date.
pub fn build_cash_flows(
    transactions: &[Transaction],
    terminal_value: Decimal,
    as_of: NaiveDate,
) -> Vec<CashFlow> {
    let mut flows: Vec<CashFlow> = transactions
        .iter()
        .map(|tx| {
            let amount = match tx.transaction_type {
                TransactionType::Buy => -tx.total_amount.abs(),
                TransactionType::Sell => tx.total_amount.abs(),
            };
            CashFlow {
                date: tx.trade_date,
                amount,
            }
        })
        .collect();

    if terminal_value > Decimal::ZERO {
        flows.push(CashFlow {
            date: as_of,
            amount: terminal_value,
        });
    }

    flows
}

/// Solve for the annualized rate. Same-sign series are not rejected; the
/// solver simply fails to converge on them and tags the result.
pub fn solve(cash_flows: &[CashFlow]) -> Xirr {
    if cash_flows.len() < 2 {
        return Xirr::NotComputable;
    }

    let base_date = match cash_flows.iter().map(|cf| cf.date).min() {
        Some(d) => d,
        None => return Xirr::NotComputable,
    };

    // Precompute (year offset, amount) pairs once
    let terms: Vec<(f64, f64)> = cash_flows
        .iter()
        .map(|cf| {
            let days = (cf.date - base_date).num_days() as f64;
            (days / 365.0, cf.amount.to_f64().unwrap_or(0.0))
        })
        .collect();

    let mut rate = INITIAL_GUESS;

    for _ in 0..MAX_ITERATIONS {
        let (npv, derivative) = npv_and_derivative(&terms, rate);

        if npv.abs() < NPV_TOLERANCE {
            return Xirr::Converged(to_decimal(rate));
        }

        // Newton step would divide by a near-zero derivative; return the
        // current estimate instead
        if derivative.abs() < DERIVATIVE_EPSILON {
            return Xirr::MaxIterationsExceeded(to_decimal(rate));
        }

        let raw = rate - npv / derivative;
        let next = raw.clamp(-0.99, 100.0);

        // A vanishing step only means convergence when the step was not
        // pinned at the clamp boundary
        if (next - rate).abs() < RATE_TOLERANCE && raw == next {
            return Xirr::Converged(to_decimal(next));
        }

        rate = next;
    }

    Xirr::MaxIterationsExceeded(to_decimal(rate))
}

fn npv_and_derivative(terms: &[(f64, f64)], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut derivative = 0.0;

    for &(years, amount) in terms {
        let discount = (1.0 + rate).powf(-years);
        npv += amount * discount;
        // d/dr [amount * (1+r)^(-t)] = -t * amount * (1+r)^(-t-1)
        derivative -= years * amount * (1.0 + rate).powf(-years - 1.0);
    }

    (npv, derivative)
}

fn to_decimal(rate: f64) -> Decimal {
    Decimal::try_from(rate).unwrap_or(Decimal::ZERO)
}
