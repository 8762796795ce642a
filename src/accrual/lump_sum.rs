//! Lump-sum compound accrual
//!
//! Each deposit compounds independently: `P * (1 + rate/n)^(n*t)` with
//! `t = elapsed days / 365` (fixed day count, not leap-aware).
//! Aggregation over a holding sums principals and their independently
//! compounded values.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{EngineError, Result};

use super::{AccrualMode, AccrualReport, AccrualSummary, Deposit};

const DAYS_PER_YEAR: f64 = 365.0;

/// Compounded value of a single principal as of a date.
pub fn value_at(
    principal: Decimal,
    annual_rate: Decimal,
    frequency: u32,
    deposited_on: NaiveDate,
    as_of: NaiveDate,
) -> Result<Decimal> {
    if as_of < deposited_on {
        return Err(EngineError::ValidationError(format!(
            "valuation date {} precedes deposit date {}",
            as_of, deposited_on
        ))
        .into());
    }
    if frequency == 0 {
        return Err(
            EngineError::ValidationError("compounding frequency must be positive".to_string())
                .into(),
        );
    }

    let days = (as_of - deposited_on).num_days() as f64;
    let years = days / DAYS_PER_YEAR;
    let rate = annual_rate.to_f64().unwrap_or(0.0);
    let n = frequency as f64;

    let factor = (1.0 + rate / n).powf(n * years);
    let value = principal.to_f64().unwrap_or(0.0) * factor;

    Ok(Decimal::try_from(value).unwrap_or(Decimal::ZERO))
}

/// Aggregate accrual over a holding's lump-sum deposits.
pub fn accrue(
    deposits: &[Deposit],
    annual_rate: Decimal,
    frequency: u32,
    as_of: NaiveDate,
) -> Result<AccrualReport> {
    let mut total_deposited = Decimal::ZERO;
    let mut current_value = Decimal::ZERO;

    for deposit in deposits {
        total_deposited += deposit.amount;
        current_value += value_at(deposit.amount, annual_rate, frequency, deposit.date, as_of)?;
    }

    let interest = current_value - total_deposited;

    Ok(AccrualReport {
        mode: AccrualMode::LumpSum,
        summary: AccrualSummary {
            total_deposited,
            interest_credited: interest,
            accrued_interest: Decimal::ZERO,
            total_interest: interest,
            current_value,
        },
        schedule: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_annual_compounding_exact_year() {
        // n=1 and exactly 365 elapsed days: value is P*(1+rate)
        let value = value_at(dec!(10000), dec!(0.08), 1, date(2023, 1, 1), date(2024, 1, 1))
            .unwrap();
        let expected = 10800.0;
        assert!((value.to_f64().unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_quarterly_beats_annual() {
        let start = date(2022, 4, 1);
        let end = date(2025, 4, 1);
        let annual = value_at(dec!(10000), dec!(0.07), 1, start, end).unwrap();
        let quarterly = value_at(dec!(10000), dec!(0.07), 4, start, end).unwrap();
        assert!(quarterly > annual);
    }

    #[test]
    fn test_zero_elapsed_days_is_principal() {
        let d = date(2024, 6, 1);
        let value = value_at(dec!(5000), dec!(0.07), 4, d, d).unwrap();
        assert!((value.to_f64().unwrap() - 5000.0).abs() < 1e-9);
    }

    #[test]
    fn test_valuation_before_deposit_is_error() {
        let result = value_at(dec!(5000), dec!(0.07), 4, date(2024, 6, 1), date(2024, 5, 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_aggregation_sums_independent_values() {
        let deposits = vec![
            Deposit {
                date: date(2022, 1, 1),
                amount: dec!(10000),
            },
            Deposit {
                date: date(2023, 1, 1),
                amount: dec!(20000),
            },
        ];
        let as_of = date(2024, 1, 1);
        let report = accrue(&deposits, dec!(0.08), 1, as_of).unwrap();

        assert_eq!(report.summary.total_deposited, dec!(30000));
        let expected = 10000.0 * 1.08_f64.powf(730.0 / 365.0) + 20000.0 * 1.08;
        assert!(
            (report.summary.current_value.to_f64().unwrap() - expected).abs() < 1e-4
        );
        assert_eq!(
            report.summary.total_interest,
            report.summary.current_value - report.summary.total_deposited
        );
        assert!(report.schedule.is_empty());
    }
}
