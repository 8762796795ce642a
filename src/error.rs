//! Error handling for the folio engine
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Core error types for engine computations
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error(
        "insufficient lot quantity for sale on {sale_date}: \
         selling {requested} units but only {available} available"
    )]
    InsufficientLotQuantity {
        sale_date: NaiveDate,
        requested: Decimal,
        available: Decimal,
    },

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = EngineError::InvalidDate("2024-13-40".to_string());
        assert_eq!(err.to_string(), "invalid date: 2024-13-40");
    }

    #[test]
    fn test_oversell_error_names_quantities() {
        let err = EngineError::InsufficientLotQuantity {
            sale_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            requested: Decimal::from(20),
            available: Decimal::from(10),
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-01-01"));
        assert!(msg.contains("20"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> =
            Err(anyhow::anyhow!("original error")).context("failed to process holding");
        match result {
            Err(e) => {
                let msg = e.to_string();
                assert!(msg.contains("failed to process holding"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("original error") || msg.contains("original error"));
            }
            Ok(_) => panic!("expected error"),
        }
    }
}
