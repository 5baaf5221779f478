// src/storage/mongo.rs

//! MongoDB storage backend.

use async_trait::async_trait;
use mongodb::bson::{DateTime as BsonDateTime, Document, doc};
use mongodb::error::ErrorKind;
use mongodb::error::PartialBulkWriteResult;
use mongodb::options::{IndexOptions, UpdateOneModel, WriteModel};
use mongodb::results::SummaryBulkWriteResult;
use mongodb::{Client, Collection, IndexModel, Namespace};

use crate::config::MongoConfig;
use crate::error::Result;
use crate::models::{CompanyDocument, UpsertOutcome};
use crate::storage::CompanyStore;

/// MongoDB-backed company document store.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    namespace: Namespace,
}

impl MongoStore {
    /// Connect to the configured database and collection.
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        Ok(Self {
            client,
            namespace: Namespace::new(config.database.clone(), config.collection.clone()),
        })
    }

    fn collection(&self) -> Collection<Document> {
        self.client
            .database(&self.namespace.db)
            .collection(&self.namespace.coll)
    }

    /// Build one replace-on-key upsert model for a document.
    fn upsert_model(&self, document: &CompanyDocument) -> Result<WriteModel> {
        let update = doc! {
            "$set": {
                "symbol": &document.symbol,
                "last_updated": BsonDateTime::from_millis(document.last_updated.timestamp_millis()),
                "data": mongodb::bson::to_bson(&document.data)?,
            }
        };

        Ok(WriteModel::UpdateOne(
            UpdateOneModel::builder()
                .namespace(self.namespace.clone())
                .filter(doc! { "symbol": &document.symbol })
                .update(update)
                .upsert(true)
                .build(),
        ))
    }
}

fn summary_outcome(summary: &SummaryBulkWriteResult) -> UpsertOutcome {
    UpsertOutcome {
        matched: summary.matched_count.max(0) as u64,
        modified: summary.modified_count.max(0) as u64,
        upserted: summary.upserted_count.max(0) as u64,
    }
}

fn partial_outcome(partial: &PartialBulkWriteResult) -> UpsertOutcome {
    match partial {
        PartialBulkWriteResult::Summary(summary) => summary_outcome(summary),
        PartialBulkWriteResult::Verbose(verbose) => summary_outcome(&verbose.summary),
    }
}

#[async_trait]
impl CompanyStore for MongoStore {
    async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "symbol": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection().create_index(index).await?;
        Ok(())
    }

    async fn bulk_upsert(&self, documents: &[CompanyDocument]) -> Result<UpsertOutcome> {
        if documents.is_empty() {
            return Ok(UpsertOutcome::default());
        }

        let models = documents
            .iter()
            .map(|document| self.upsert_model(document))
            .collect::<Result<Vec<_>>>()?;

        match self.client.bulk_write(models).ordered(false).await {
            Ok(result) => Ok(summary_outcome(&result)),
            // With unordered execution the server attempts every operation;
            // per-operation rejections come back as write errors alongside a
            // partial result. Absorb them into counts instead of failing the
            // batch.
            Err(error) => match *error.kind {
                ErrorKind::BulkWrite(ref failure) if !failure.write_errors.is_empty() => {
                    for (index, write_error) in &failure.write_errors {
                        log::warn!(
                            "Write {} rejected ({}): {}",
                            index,
                            documents
                                .get(*index)
                                .map(|d| d.symbol.as_str())
                                .unwrap_or("?"),
                            write_error.message
                        );
                    }
                    Ok(failure
                        .partial_result
                        .as_ref()
                        .map(partial_outcome)
                        .unwrap_or_default())
                }
                _ => Err(error.into()),
            },
        }
    }
}
