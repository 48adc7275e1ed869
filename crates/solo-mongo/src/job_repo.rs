//! Typed repository for job documents.

use futures::stream::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use tracing::info;

use solo_models::{Job, JobPayload};

use crate::client::MongoStore;
use crate::error::{parse_object_id, StoreResult};

/// Collection name for job postings.
const COLLECTION: &str = "jobs";

/// Outcome of a replace-or-insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// Number of existing documents matched (0 or 1).
    pub matched: u64,
    /// Number of documents modified in place.
    pub modified: u64,
    /// Set when no document matched and a new one was inserted.
    pub upserted_id: Option<ObjectId>,
}

/// Repository for job documents.
pub struct JobRepository {
    jobs: Collection<Document>,
}

impl JobRepository {
    /// Create a new job repository over the shared store handle.
    pub fn new(store: &MongoStore) -> Self {
        Self {
            jobs: store.collection(COLLECTION),
        }
    }

    /// List every job, unfiltered.
    pub async fn list_all(&self) -> StoreResult<Vec<Job>> {
        let cursor = self.jobs.find(doc! {}).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter()
            .map(|d| Ok(mongodb::bson::from_document(d)?))
            .collect()
    }

    /// Get a single job by its hex id.
    pub async fn get(&self, id: &str) -> StoreResult<Option<Job>> {
        let oid = parse_object_id(id)?;
        let doc = self.jobs.find_one(doc! { "_id": oid }).await?;
        match doc {
            Some(d) => Ok(Some(mongodb::bson::from_document(d)?)),
            None => Ok(None),
        }
    }

    /// List jobs posted by the given buyer.
    pub async fn list_by_buyer(&self, email: &str) -> StoreResult<Vec<Job>> {
        let cursor = self.jobs.find(buyer_email_filter(email)).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter()
            .map(|d| Ok(mongodb::bson::from_document(d)?))
            .collect()
    }

    /// Insert a new job with a generated id.
    pub async fn insert(&self, payload: &JobPayload) -> StoreResult<ObjectId> {
        let oid = ObjectId::new();
        let mut doc = mongodb::bson::to_document(payload)?;
        doc.insert("_id", oid);

        self.jobs.insert_one(doc).await?;
        info!(job_id = %oid, buyer = %payload.buyer.email, "created job");
        Ok(oid)
    }

    /// Replace the job matching `id`, inserting it when absent.
    ///
    /// Last write wins; there is no optimistic concurrency here.
    pub async fn upsert(&self, id: &str, payload: &JobPayload) -> StoreResult<UpsertOutcome> {
        let oid = parse_object_id(id)?;
        let replacement = mongodb::bson::to_document(payload)?;

        let result = self
            .jobs
            .replace_one(doc! { "_id": oid }, replacement)
            .upsert(true)
            .await?;

        Ok(UpsertOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
            upserted_id: result.upserted_id.as_ref().and_then(|b| b.as_object_id()),
        })
    }

    /// Delete the job matching `id`. Returns the deleted count; an absent
    /// id deletes nothing and is still a success.
    pub async fn delete(&self, id: &str) -> StoreResult<u64> {
        let oid = parse_object_id(id)?;
        let result = self.jobs.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count > 0 {
            info!(job_id = %oid, "deleted job");
        }
        Ok(result.deleted_count)
    }
}

/// Filter for jobs owned by a buyer (dotted path into the embedded buyer).
pub(crate) fn buyer_email_filter(email: &str) -> Document {
    doc! { "buyer.email": email }
}
