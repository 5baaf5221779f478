// src/pipeline/sync.rs

//! Company data sync pipeline.
//!
//! Enumerates the symbol universe once, partitions it into contiguous
//! batches and processes those strictly sequentially: fetch the quote
//! summary data for a batch, then submit one unordered bulk upsert for it.
//! A failing batch propagates; batches persisted before it stay persisted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::Result;
use crate::models::{CompanyDocument, UpsertOutcome};
use crate::services::{QuoteSummaryClient, ScreenerClient};
use crate::storage::CompanyStore;

/// Aggregate result of a sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Symbols enumerated from the screener
    pub symbol_count: usize,

    /// Batches processed
    pub batch_count: usize,

    /// Accumulated upsert counts across all batches
    pub outcome: UpsertOutcome,
}

/// Build exactly one document per symbol in the batch.
///
/// Symbols absent from the fetched data still get a document, with an empty
/// payload, so a batch always writes every symbol it was asked to cover.
pub fn build_documents(
    symbols: &[String],
    details: &HashMap<String, serde_json::Value>,
    timestamp: DateTime<Utc>,
) -> Vec<CompanyDocument> {
    symbols
        .iter()
        .map(|symbol| {
            CompanyDocument::new(symbol.clone(), details.get(symbol).cloned(), timestamp)
        })
        .collect()
}

/// Run the full sync: enumerate → batch → fetch → upsert.
pub async fn run_sync(
    config: &Config,
    screener: &ScreenerClient,
    summaries: &QuoteSummaryClient,
    store: &dyn CompanyStore,
) -> Result<SyncReport> {
    let symbols = screener.fetch_symbols().await?;
    if symbols.is_empty() {
        log::warn!("No symbols found from screener.");
        return Ok(SyncReport::default());
    }

    let batch_size = config.summary.batch_size;
    let total_batches = symbols.len().div_ceil(batch_size);
    let mut totals = UpsertOutcome::default();

    for (index, batch) in symbols.chunks(batch_size).enumerate() {
        log::info!("Fetching batch {}/{}", index + 1, total_batches);

        let details = summaries.fetch_chunk(batch, &config.summary.modules).await?;
        let timestamp = Utc::now();
        let documents = build_documents(batch, &details, timestamp);

        let outcome = store.bulk_upsert(&documents).await?;
        log::info!(
            "Upserted {} documents (matched {}, modified {})",
            outcome.upserted,
            outcome.matched,
            outcome.modified
        );
        totals.absorb(outcome);
    }

    log::info!(
        "Sync complete: {} symbols in {} batches (matched {}, modified {}, upserted {})",
        symbols.len(),
        total_batches,
        totals.matched,
        totals.modified,
        totals.upserted
    );

    Ok(SyncReport {
        symbol_count: symbols.len(),
        batch_count: total_batches,
        outcome: totals,
    })
}
