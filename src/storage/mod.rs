// src/storage/mod.rs

//! Storage abstractions for company document persistence.
//!
//! The store is a keyed document collection with a unique index on `symbol`
//! and an unordered bulk upsert. Production deployments use [`MongoStore`];
//! tests use the in-memory double in `memory`.

pub mod mongo;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CompanyDocument, UpsertOutcome};

// Re-export for convenience
pub use mongo::MongoStore;

/// Trait for company document storage backends.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Create the unique symbol index if it does not exist yet.
    async fn ensure_indexes(&self) -> Result<()>;

    /// Upsert one batch of documents with unordered semantics.
    ///
    /// Each document fully replaces the `data` and `last_updated` fields of
    /// the document with the same `symbol`, creating it if absent. One
    /// operation's rejection must not prevent the others in the batch from
    /// committing; rejected operations are logged and reflected only in the
    /// returned counts. A failure of the bulk call itself propagates.
    async fn bulk_upsert(&self, documents: &[CompanyDocument]) -> Result<UpsertOutcome>;
}
