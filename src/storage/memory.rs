// src/storage/memory.rs

//! In-memory storage double for tests.
//!
//! Mirrors the unordered bulk upsert semantics of [`MongoStore`]: every
//! operation in a batch is attempted, a configured per-key rejection does
//! not stop the others, and counts distinguish matched, modified and
//! upserted documents.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CompanyDocument, UpsertOutcome};
use crate::storage::CompanyStore;

/// In-memory company document store.
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<HashMap<String, CompanyDocument>>,
    reject_symbol: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects every write for one symbol, standing in
    /// for a per-operation constraint violation.
    pub fn rejecting(symbol: impl Into<String>) -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            reject_symbol: Some(symbol.into()),
        }
    }

    /// Snapshot of the stored documents keyed by symbol.
    pub fn documents(&self) -> HashMap<String, CompanyDocument> {
        self.documents.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn ensure_indexes(&self) -> Result<()> {
        Ok(())
    }

    async fn bulk_upsert(&self, documents: &[CompanyDocument]) -> Result<UpsertOutcome> {
        let mut store = self.documents.lock().unwrap();
        let mut outcome = UpsertOutcome::default();

        for document in documents {
            if self.reject_symbol.as_deref() == Some(document.symbol.as_str()) {
                continue;
            }

            match store.get(&document.symbol) {
                Some(existing) => {
                    outcome.matched += 1;
                    if existing != document {
                        outcome.modified += 1;
                        store.insert(document.symbol.clone(), document.clone());
                    }
                }
                None => {
                    outcome.upserted += 1;
                    store.insert(document.symbol.clone(), document.clone());
                }
            }
        }

        Ok(outcome)
    }
}
