// Reports module - per-holding pipeline and portfolio-wide aggregation

pub mod holding;
pub mod portfolio;

pub use holding::{analyze_holding, HoldingReport};
pub use portfolio::{analyze_portfolio, PortfolioReport};
