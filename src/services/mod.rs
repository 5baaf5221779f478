// src/services/mod.rs

//! Remote endpoint clients.

pub mod quote_summary;
pub mod screener;

pub use quote_summary::QuoteSummaryClient;
pub use screener::ScreenerClient;
