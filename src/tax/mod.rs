// Tax module - capital gains classification (long/short buckets, exemption, liability estimate)

pub mod classify;

pub use classify::{
    classify_holding, summarize_portfolio, GainTerm, HoldingGains, TaxSummary,
};
