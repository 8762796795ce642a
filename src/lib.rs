//! Folio - personal portfolio metrics engine
//!
//! Computes derived financial metrics from a raw transaction log:
//! annualized internal rates of return for irregular cash flows, fixed-
//! income accrual with financial-year crediting rules, FIFO realized and
//! unrealized gain attribution, and capital-gains tax classification.
//! Every computation is pure and recomputed from the full history on
//! each call; persistence, pricing and rendering live with the callers.

pub mod accrual;
pub mod cli;
pub mod config;
pub mod error;
pub mod lots;
pub mod model;
pub mod reports;
pub mod tax;
pub mod utils;
pub mod xirr;
