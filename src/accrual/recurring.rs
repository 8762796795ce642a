//! Recurring-deposit accrual with financial-year crediting
//!
//! Deposits group into April–March financial years. Each period earns
//! interest on its opening balance for the months elapsed, plus a
//! contribution per deposit: amounts put in on or before the monthly
//! cutoff day start accruing that same month, later amounts start the
//! following month. Interest credits to the balance only at period
//! boundaries; the running period's interest is reported as accrued.

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

use super::{AccrualMode, AccrualReport, AccrualSummary, Deposit};

/// Where a schedule period stands relative to the as-of date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodStatus {
    Completed,
    Current,
    Upcoming,
}

/// One financial-year row of the accrual schedule.
/// Each row's closing balance is the next row's opening balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualScheduleEntry {
    pub period_label: String,
    pub status: PeriodStatus,
    pub opening_balance: Decimal,
    pub deposits_in_period: Decimal,
    pub interest_earned: Decimal,
    pub closing_balance: Decimal,
}

/// Start year of the financial year containing a date
/// (FY2023 runs 2023-04-01 through 2024-03-31)
fn fy_start_year(date: NaiveDate) -> i32 {
    if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    }
}

fn fy_label(start_year: i32) -> String {
    format!("FY{}-{:02}", start_year, (start_year + 1).rem_euclid(100))
}

/// Month position within the financial year: April=1 .. March=12
fn fy_month_index(month: u32) -> u32 {
    (month + 8) % 12 + 1
}

/// Build the full period schedule and summary for a recurring-deposit
/// holding. Periods run from the first deposit's financial year through
/// the as-of year (or further, marked Upcoming, when deposits are
/// post-dated).
pub fn accrue(
    deposits: &[Deposit],
    annual_rate: Decimal,
    as_of: NaiveDate,
    cutoff_day: u32,
) -> Result<AccrualReport> {
    if !(1..=31).contains(&cutoff_day) {
        return Err(EngineError::ValidationError(format!(
            "deposit cutoff day {} is not a valid day of month",
            cutoff_day
        ))
        .into());
    }

    if deposits.is_empty() {
        return Ok(empty_report());
    }

    let by_fy = deposits
        .iter()
        .map(|d| (fy_start_year(d.date), d))
        .into_group_map();

    let first_fy = deposits.iter().map(|d| fy_start_year(d.date)).min().unwrap_or(0);
    let last_deposit_fy = deposits.iter().map(|d| fy_start_year(d.date)).max().unwrap_or(0);
    let current_fy = fy_start_year(as_of);
    let last_fy = current_fy.max(last_deposit_fy);

    let twelve = Decimal::from(12);
    let mut schedule = Vec::new();
    let mut opening = Decimal::ZERO;
    let mut interest_credited = Decimal::ZERO;
    let mut accrued_interest = Decimal::ZERO;

    for fy in first_fy..=last_fy {
        let (status, months_elapsed) = if fy < current_fy {
            (PeriodStatus::Completed, 12i64)
        } else if fy == current_fy {
            (PeriodStatus::Current, fy_month_index(as_of.month()) as i64)
        } else {
            (PeriodStatus::Upcoming, 0i64)
        };

        let period_deposits = by_fy.get(&fy).map(Vec::as_slice).unwrap_or(&[]);
        let deposits_in_period = period_deposits
            .iter()
            .fold(Decimal::ZERO, |acc, d| acc + d.amount);

        // Opening balance earns for every month elapsed in the period
        let mut interest = opening * annual_rate * Decimal::from(months_elapsed) / twelve;

        // Each deposit earns from its crediting month through period end,
        // clamped to the months actually elapsed
        for deposit in period_deposits {
            let idx = fy_month_index(deposit.date.month()) as i64;
            let (start_offset, cap) = if deposit.date.day() <= cutoff_day {
                (months_elapsed - idx + 1, 13 - idx)
            } else {
                (months_elapsed - idx, 12 - idx)
            };
            let effective_months = start_offset.clamp(0, cap);
            interest +=
                deposit.amount * annual_rate * Decimal::from(effective_months) / twelve;
        }

        let closing = opening + deposits_in_period + interest;

        match status {
            PeriodStatus::Completed => interest_credited += interest,
            PeriodStatus::Current => accrued_interest += interest,
            PeriodStatus::Upcoming => {}
        }

        schedule.push(AccrualScheduleEntry {
            period_label: fy_label(fy),
            status,
            opening_balance: opening,
            deposits_in_period,
            interest_earned: interest,
            closing_balance: closing,
        });

        opening = closing;
    }

    // Only deposits made by the as-of date count toward current value;
    // post-dated deposits appear in the schedule but not the totals
    let total_deposited = deposits
        .iter()
        .filter(|d| d.date <= as_of)
        .fold(Decimal::ZERO, |acc, d| acc + d.amount);

    Ok(AccrualReport {
        mode: AccrualMode::RecurringSchedule,
        summary: AccrualSummary {
            total_deposited,
            interest_credited,
            accrued_interest,
            total_interest: interest_credited + accrued_interest,
            current_value: total_deposited + interest_credited,
        },
        schedule,
    })
}

fn empty_report() -> AccrualReport {
    AccrualReport {
        mode: AccrualMode::RecurringSchedule,
        summary: AccrualSummary {
            total_deposited: Decimal::ZERO,
            interest_credited: Decimal::ZERO,
            accrued_interest: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            current_value: Decimal::ZERO,
        },
        schedule: Vec::new(),
    }
}
