//! Core value objects consumed and produced by the engine
//!
//! Transactions and instrument metadata arrive from external collaborators
//! (import, persistence, pricing are out of scope); everything here is a
//! plain serializable value object with no behavior beyond classification
//! helpers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Instrument kinds supported by the engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    Equity,           // Listed shares
    MutualFund,       // Open-ended fund units
    Etf,              // Exchange-traded funds
    Gold,             // Sovereign gold bonds / gold units
    FixedDeposit,     // Bank fixed deposit (lump sum)
    RecurringDeposit, // Monthly recurring deposit
    ProvidentFund,    // PPF-style account with calendar crediting rules
    Bond,             // Coupon or cumulative bonds
}

impl InstrumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentKind::Equity => "EQUITY",
            InstrumentKind::MutualFund => "MUTUAL_FUND",
            InstrumentKind::Etf => "ETF",
            InstrumentKind::Gold => "GOLD",
            InstrumentKind::FixedDeposit => "FIXED_DEPOSIT",
            InstrumentKind::RecurringDeposit => "RECURRING_DEPOSIT",
            InstrumentKind::ProvidentFund => "PROVIDENT_FUND",
            InstrumentKind::Bond => "BOND",
        }
    }

    /// Compounding periods per year for value accrual
    pub fn compounding_frequency(&self) -> u32 {
        match self {
            InstrumentKind::FixedDeposit => 4, // Banks credit FD interest quarterly
            InstrumentKind::Bond => 1,
            InstrumentKind::RecurringDeposit => 1,
            InstrumentKind::ProvidentFund => 1,
            // Market-priced instruments never reach the accrual engine,
            // but the table stays total.
            InstrumentKind::Equity
            | InstrumentKind::MutualFund
            | InstrumentKind::Etf
            | InstrumentKind::Gold => 1,
        }
    }

    /// Whether buys and sells of this kind are matched through FIFO lots.
    /// Fixed-income kinds bypass the lot tracker and accrue instead.
    pub fn uses_fifo(&self) -> bool {
        !self.is_fixed_income()
    }

    pub fn is_fixed_income(&self) -> bool {
        matches!(
            self,
            InstrumentKind::FixedDeposit
                | InstrumentKind::RecurringDeposit
                | InstrumentKind::ProvidentFund
                | InstrumentKind::Bond
        )
    }

    /// Whether deposits are grouped into financial-year periods with
    /// month-wise crediting (vs a single independently compounded lump sum).
    pub fn uses_recurring_schedule(&self) -> bool {
        matches!(
            self,
            InstrumentKind::RecurringDeposit | InstrumentKind::ProvidentFund
        )
    }
}

impl FromStr for InstrumentKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EQUITY" | "STOCK" => Ok(InstrumentKind::Equity),
            "MUTUAL_FUND" | "MF" => Ok(InstrumentKind::MutualFund),
            "ETF" => Ok(InstrumentKind::Etf),
            "GOLD" | "SGB" => Ok(InstrumentKind::Gold),
            "FIXED_DEPOSIT" | "FD" => Ok(InstrumentKind::FixedDeposit),
            "RECURRING_DEPOSIT" | "RD" => Ok(InstrumentKind::RecurringDeposit),
            "PROVIDENT_FUND" | "PPF" => Ok(InstrumentKind::ProvidentFund),
            "BOND" => Ok(InstrumentKind::Bond),
            _ => Err(()),
        }
    }
}

/// Transaction type (buy or sell)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
        }
    }
}

impl FromStr for TransactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" | "DEPOSIT" | "B" => Ok(TransactionType::Buy),
            "SELL" | "WITHDRAWAL" | "S" => Ok(TransactionType::Sell),
            _ => Err(()),
        }
    }
}

/// A single recorded buy or sell, immutable once recorded upstream.
/// `total_amount` is quantity * price as recorded; the engine trusts it
/// rather than recomputing, since upstream may include rounding rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_type: TransactionType,
    pub trade_date: NaiveDate,
    pub quantity: Decimal,
    pub price_per_unit: Decimal,
    pub total_amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    /// Seed position carried in from before the recorded history began
    #[serde(default)]
    pub is_opening_balance: bool,
}

impl Transaction {
    pub fn buy(date: NaiveDate, quantity: Decimal, price: Decimal) -> Self {
        Self {
            transaction_type: TransactionType::Buy,
            trade_date: date,
            quantity,
            price_per_unit: price,
            total_amount: quantity * price,
            notes: None,
            is_opening_balance: false,
        }
    }

    pub fn sell(date: NaiveDate, quantity: Decimal, price: Decimal) -> Self {
        Self {
            transaction_type: TransactionType::Sell,
            trade_date: date,
            quantity,
            price_per_unit: price,
            total_amount: quantity * price,
            notes: None,
            is_opening_balance: false,
        }
    }
}

/// One holding: instrument metadata plus its full transaction history and
/// externally resolved quote. This is the engine's unit of work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub name: String,
    pub kind: InstrumentKind,
    pub transactions: Vec<Transaction>,
    /// Current market price per unit, already resolved by the caller.
    /// Required for market-priced kinds, ignored for fixed income.
    #[serde(default)]
    pub current_price: Option<Decimal>,
    /// Annual interest rate as a fraction (0.071 = 7.1%).
    /// Required for fixed-income kinds, ignored otherwise.
    #[serde(default)]
    pub interest_rate: Option<Decimal>,
}
