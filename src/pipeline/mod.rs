// src/pipeline/mod.rs

//! Pipeline entry point for the sync run.
//!
//! - `run_sync`: enumerate symbols, then fetch and upsert company data
//!   batch by batch.

pub mod sync;

pub use sync::{SyncReport, build_documents, run_sync};
