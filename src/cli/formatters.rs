//! Output formatting for CLI display
//!
//! Keeps presentation out of the engine: reports come in as value
//! objects, tables and colored summaries go out.

use colored::Colorize;
use rust_decimal::Decimal;
use tabled::{settings::Style, Table, Tabled};

use crate::accrual::PeriodStatus;
use crate::reports::{HoldingReport, PortfolioReport};
use crate::utils::{format_currency, format_rate_pct};
use crate::xirr::Xirr;

fn signed_currency(value: Decimal) -> String {
    let formatted = format_currency(value);
    if value >= Decimal::ZERO {
        formatted.green().to_string()
    } else {
        formatted.red().to_string()
    }
}

fn xirr_cell(xirr: &Xirr) -> String {
    match xirr {
        Xirr::NotComputable => "n/a".to_string(),
        Xirr::Converged(rate) => format_rate_pct(*rate),
        // Best-effort estimate, marked so it is not mistaken for a solved rate
        Xirr::MaxIterationsExceeded(rate) => format!("{} (est.)", format_rate_pct(*rate)),
    }
}

/// Render the full portfolio report as tables plus a tax summary.
pub fn format_portfolio_table(report: &PortfolioReport) -> String {
    #[derive(Tabled)]
    struct HoldingRow {
        #[tabled(rename = "Holding")]
        name: String,
        #[tabled(rename = "Kind")]
        kind: String,
        #[tabled(rename = "Invested")]
        invested: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Realized P&L")]
        realized: String,
        #[tabled(rename = "Unrealized P&L")]
        unrealized: String,
        #[tabled(rename = "XIRR")]
        xirr: String,
    }

    let rows: Vec<HoldingRow> = report
        .holdings
        .iter()
        .map(|h| HoldingRow {
            name: h.name.clone(),
            kind: h.kind.as_str().to_string(),
            invested: format_currency(h.invested),
            value: format_currency(h.market_value),
            realized: signed_currency(h.classified.total_realized()),
            unrealized: signed_currency(h.classified.total_unrealized()),
            xirr: xirr_cell(&h.annualized_return),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());

    let mut output = format!(
        "\nPortfolio as of {}\n\n{}\n\n",
        report.as_of,
        table
    );

    output.push_str(&format!(
        "Total invested:      {}\n\
         Total market value:  {}\n\
         Portfolio XIRR:      {}\n\n",
        format_currency(report.total_invested),
        format_currency(report.total_market_value),
        xirr_cell(&report.annualized_return),
    ));

    output.push_str(&format!(
        "{}\n\
         Long-term gain:      {}\n\
         Short-term gain:     {}\n\
         Exemption applied:   {}\n\
         Taxable (LT / ST):   {} / {}\n\
         Estimated tax:       {}\n",
        "Capital gains".bold(),
        signed_currency(report.tax.total_long_term_gain),
        signed_currency(report.tax.total_short_term_gain),
        format_currency(report.tax.exemption_applied),
        format_currency(report.tax.taxable_long_term),
        format_currency(report.tax.taxable_short_term),
        format_currency(report.tax.total_tax),
    ));

    output
}

/// Render one fixed-income holding's financial-year schedule.
pub fn format_schedule_table(holding: &HoldingReport) -> String {
    let accrual = match &holding.accrual {
        Some(a) => a,
        None => {
            return format!(
                "{} is market-priced; no accrual schedule\n",
                holding.name
            )
        }
    };

    #[derive(Tabled)]
    struct ScheduleRow {
        #[tabled(rename = "Period")]
        period: String,
        #[tabled(rename = "Status")]
        status: String,
        #[tabled(rename = "Opening")]
        opening: String,
        #[tabled(rename = "Deposits")]
        deposits: String,
        #[tabled(rename = "Interest")]
        interest: String,
        #[tabled(rename = "Closing")]
        closing: String,
    }

    let rows: Vec<ScheduleRow> = accrual
        .schedule
        .iter()
        .map(|entry| ScheduleRow {
            period: entry.period_label.clone(),
            status: match entry.status {
                PeriodStatus::Completed => "Completed".to_string(),
                PeriodStatus::Current => "Current".green().to_string(),
                PeriodStatus::Upcoming => "Upcoming".dimmed().to_string(),
            },
            opening: format_currency(entry.opening_balance),
            deposits: format_currency(entry.deposits_in_period),
            interest: format_currency(entry.interest_earned),
            closing: format_currency(entry.closing_balance),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());

    format!(
        "\n{} accrual schedule\n\n{}\n\n\
         Deposited:           {}\n\
         Interest credited:   {}\n\
         Accrued (current FY): {}\n\
         Current value:       {}\n",
        holding.name,
        table,
        format_currency(accrual.summary.total_deposited),
        format_currency(accrual.summary.interest_credited),
        format_currency(accrual.summary.accrued_interest),
        format_currency(accrual.summary.current_value),
    )
}

/// Render annualized returns only, one row per holding.
pub fn format_xirr_table(report: &PortfolioReport) -> String {
    #[derive(Tabled)]
    struct XirrRow {
        #[tabled(rename = "Holding")]
        name: String,
        #[tabled(rename = "Invested")]
        invested: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "XIRR")]
        xirr: String,
    }

    let rows: Vec<XirrRow> = report
        .holdings
        .iter()
        .map(|h| XirrRow {
            name: h.name.clone(),
            invested: format_currency(h.invested),
            value: format_currency(h.market_value),
            xirr: xirr_cell(&h.annualized_return),
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::modern());

    format!(
        "\n{}\n\nPortfolio XIRR: {}\n",
        table,
        xirr_cell(&report.annualized_return)
    )
}
