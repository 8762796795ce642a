//! Compounded value accrual for fixed-income holdings
//!
//! Two modes behind one interface: lump-sum deposits compound
//! independently at the instrument's frequency; recurring-deposit
//! instruments follow financial-year crediting rules with a monthly
//! deposit cutoff. Instrument kind selects the mode.

pub mod lump_sum;
pub mod recurring;

pub use recurring::{AccrualScheduleEntry, PeriodStatus};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{InstrumentKind, Transaction, TransactionType};

/// Accrual mode, resolved from instrument metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccrualMode {
    LumpSum,
    RecurringSchedule,
}

impl AccrualMode {
    pub fn for_kind(kind: InstrumentKind) -> Self {
        if kind.uses_recurring_schedule() {
            AccrualMode::RecurringSchedule
        } else {
            AccrualMode::LumpSum
        }
    }
}

/// One principal amount put in on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub date: NaiveDate,
    pub amount: Decimal,
}

/// Summary totals common to both modes. For recurring instruments the
/// current value carries only interest credited at completed period
/// boundaries; the running period's interest is accrued, not credited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualSummary {
    pub total_deposited: Decimal,
    pub interest_credited: Decimal,
    pub accrued_interest: Decimal,
    pub total_interest: Decimal,
    pub current_value: Decimal,
}

/// Full accrual output: summary plus the per-period schedule
/// (empty for lump-sum instruments)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccrualReport {
    pub mode: AccrualMode,
    pub summary: AccrualSummary,
    pub schedule: Vec<AccrualScheduleEntry>,
}

/// Extract deposits from a transaction history. Fixed-income holdings are
/// deposit-only in this engine; anything else upstream recorded is skipped.
pub fn deposits_from_transactions(transactions: &[Transaction]) -> Vec<Deposit> {
    transactions
        .iter()
        .filter(|tx| tx.transaction_type == TransactionType::Buy)
        .map(|tx| Deposit {
            date: tx.trade_date,
            amount: tx.total_amount.abs(),
        })
        .collect()
}

/// Accrue a fixed-income holding as of a date, dispatching on kind.
pub fn accrue(
    kind: InstrumentKind,
    deposits: &[Deposit],
    annual_rate: Decimal,
    as_of: NaiveDate,
    deposit_cutoff_day: u32,
) -> Result<AccrualReport> {
    match AccrualMode::for_kind(kind) {
        AccrualMode::LumpSum => {
            lump_sum::accrue(deposits, annual_rate, kind.compounding_frequency(), as_of)
        }
        AccrualMode::RecurringSchedule => {
            recurring::accrue(deposits, annual_rate, as_of, deposit_cutoff_day)
        }
    }
}
