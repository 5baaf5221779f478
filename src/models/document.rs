// src/models/document.rs

//! Persisted document and upsert accounting structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company data document keyed by symbol.
///
/// The `data` payload is the raw quote summary response for the symbol and
/// is stored opaquely; no field-level typing is attempted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyDocument {
    /// Ticker symbol, unique within the collection
    pub symbol: String,

    /// Time this document was last refreshed
    pub last_updated: DateTime<Utc>,

    /// Opaque quote summary payload; an empty object when the symbol
    /// returned no data
    pub data: serde_json::Value,
}

impl CompanyDocument {
    /// Build a document for a symbol, substituting an empty payload when the
    /// fetch returned nothing for it.
    pub fn new(
        symbol: String,
        data: Option<serde_json::Value>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol,
            last_updated,
            data: data.unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())),
        }
    }
}

/// Aggregate result of a bulk upsert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Documents whose key already existed
    pub matched: u64,

    /// Documents whose content actually changed
    pub modified: u64,

    /// Documents created by this batch
    pub upserted: u64,
}

impl UpsertOutcome {
    /// Fold another batch outcome into a running total.
    pub fn absorb(&mut self, other: UpsertOutcome) {
        self.matched += other.matched;
        self.modified += other.modified;
        self.upserted += other.upserted;
    }
}
