// src/models/mod.rs

//! Data structures shared across services, pipeline and storage.

pub mod document;
pub mod screener;

pub use document::{CompanyDocument, UpsertOutcome};
pub use screener::{ScreenerQuote, ScreenerRequest, ScreenerResponse};
