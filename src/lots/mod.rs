//! FIFO lot tracking
//!
//! Buys append lots to the back of a queue; sells consume from the front,
//! oldest first, emitting one gain record per lot boundary crossed. The
//! final open lots feed unrealized-gain marks, the gain records feed tax
//! classification.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::EngineError;
use crate::model::{Transaction, TransactionType};

/// An open purchase lot: what remains unsold of one buy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub acquisition_date: NaiveDate,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
}

/// Realized gain from consuming (part of) one lot in one sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainRecord {
    pub realized_amount: Decimal,
    pub holding_period_days: i64,
    pub consumed_quantity: Decimal,
    pub sale_date: NaiveDate,
}

/// Result of running one holding's history through the tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FifoOutcome {
    pub open_lots: Vec<Lot>,
    pub gains: Vec<GainRecord>,
}

/// FIFO matcher for one holding's lot queue
pub struct FifoLedger {
    lots: VecDeque<Lot>,
}

impl FifoLedger {
    pub fn new() -> Self {
        Self {
            lots: VecDeque::new(),
        }
    }

    pub fn add_purchase(&mut self, tx: &Transaction) {
        if tx.transaction_type != TransactionType::Buy {
            return;
        }

        self.lots.push_back(Lot {
            acquisition_date: tx.trade_date,
            quantity: tx.quantity,
            unit_cost: tx.price_per_unit,
        });
    }

    /// Consume lots front-to-back for a sale, producing one GainRecord per
    /// lot crossed. Selling more than the open quantity is an error and
    /// leaves the queue untouched.
    pub fn match_sale(&mut self, tx: &Transaction) -> Result<Vec<GainRecord>> {
        if tx.transaction_type != TransactionType::Sell {
            return Err(EngineError::ValidationError(
                "transaction is not a sale".to_string(),
            )
            .into());
        }

        let available = self.open_quantity();
        if tx.quantity > available {
            return Err(EngineError::InsufficientLotQuantity {
                sale_date: tx.trade_date,
                requested: tx.quantity,
                available,
            }
            .into());
        }

        let mut remaining = tx.quantity;
        let mut records = Vec::new();

        while remaining > Decimal::ZERO {
            let front = match self.lots.front_mut() {
                Some(lot) => lot,
                None => break, // unreachable after the availability check
            };

            let consumed = front.quantity.min(remaining);
            let realized = consumed * tx.price_per_unit - consumed * front.unit_cost;
            records.push(GainRecord {
                realized_amount: realized,
                holding_period_days: (tx.trade_date - front.acquisition_date).num_days(),
                consumed_quantity: consumed,
                sale_date: tx.trade_date,
            });

            remaining -= consumed;
            if consumed == front.quantity {
                self.lots.pop_front();
            } else {
                front.quantity -= consumed;
            }
        }

        Ok(records)
    }

    pub fn open_quantity(&self) -> Decimal {
        self.lots
            .iter()
            .fold(Decimal::ZERO, |acc, lot| acc + lot.quantity)
    }

    pub fn into_open_lots(self) -> Vec<Lot> {
        self.lots.into_iter().collect()
    }
}

impl Default for FifoLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a date-ordered transaction list through a fresh ledger.
pub fn track(transactions: &[Transaction]) -> Result<FifoOutcome> {
    let mut ledger = FifoLedger::new();
    let mut gains = Vec::new();

    for tx in transactions {
        match tx.transaction_type {
            TransactionType::Buy => ledger.add_purchase(tx),
            TransactionType::Sell => gains.extend(ledger.match_sale(tx)?),
        }
    }

    Ok(FifoOutcome {
        open_lots: ledger.into_open_lots(),
        gains,
    })
}
