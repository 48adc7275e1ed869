//! Typed repository for bid documents.
//!
//! Bid uniqueness is enforced twice: a pre-insert existence check gives the
//! client a friendly rejection, and a unique compound index on
//! `(email, job_id)` closes the check-then-insert race under concurrent
//! submissions. Duplicate-key write errors map to the same rejection.

use futures::stream::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Collection, IndexModel};
use tracing::info;

use solo_models::{Bid, BidPayload};

use crate::client::MongoStore;
use crate::error::{is_duplicate_key, parse_object_id, StoreError, StoreResult};

/// Collection name for bids.
const COLLECTION: &str = "bids";

/// Name of the unique bidder/job index.
const UNIQUE_BID_INDEX: &str = "uniq_email_job_id";

/// Repository for bid documents.
pub struct BidRepository {
    bids: Collection<Document>,
}

impl BidRepository {
    /// Create a new bid repository over the shared store handle.
    pub fn new(store: &MongoStore) -> Self {
        Self {
            bids: store.collection(COLLECTION),
        }
    }

    /// Create the unique `(email, job_id)` index. Idempotent; called once
    /// at startup.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1, "job_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(UNIQUE_BID_INDEX.to_string())
                    .build(),
            )
            .build();

        self.bids.create_index(index).await?;
        Ok(())
    }

    /// List bids placed by the given bidder.
    pub async fn list_by_bidder(&self, email: &str) -> StoreResult<Vec<Bid>> {
        self.collect(bidder_filter(email)).await
    }

    /// List bids against jobs owned by the given buyer (the denormalized
    /// `buyer.email` written at bid creation).
    pub async fn list_by_job_owner(&self, email: &str) -> StoreResult<Vec<Bid>> {
        self.collect(job_owner_filter(email)).await
    }

    /// Find an existing bid for the `(email, job_id)` pair.
    pub async fn find_existing(&self, email: &str, job_id: ObjectId) -> StoreResult<Option<Bid>> {
        let doc = self.bids.find_one(duplicate_filter(email, job_id)).await?;
        match doc {
            Some(d) => Ok(Some(mongodb::bson::from_document(d)?)),
            None => Ok(None),
        }
    }

    /// Insert a bid, rejecting duplicates for the same `(email, job_id)`.
    pub async fn insert(&self, payload: &BidPayload) -> StoreResult<ObjectId> {
        let job_oid = parse_object_id(&payload.job_id)?;

        if self.find_existing(&payload.email, job_oid).await?.is_some() {
            return Err(StoreError::DuplicateBid(payload.email.clone()));
        }

        let oid = ObjectId::new();
        let mut doc = mongodb::bson::to_document(payload)?;
        doc.insert("_id", oid);
        // The payload serializes job_id as a hex string; store the real ObjectId
        doc.insert("job_id", job_oid);

        match self.bids.insert_one(doc).await {
            Ok(_) => {
                info!(bid_id = %oid, bidder = %payload.email, job_id = %job_oid, "created bid");
                Ok(oid)
            }
            // Lost the race against a concurrent identical submission
            Err(err) if is_duplicate_key(&err) => {
                Err(StoreError::DuplicateBid(payload.email.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Set the status of the bid matching `id`. Returns the modified
    /// count; an absent id modifies nothing and is still a success.
    pub async fn update_status(&self, id: &str, status: &str) -> StoreResult<u64> {
        let oid = parse_object_id(id)?;
        let result = self
            .bids
            .update_one(doc! { "_id": oid }, status_update(status))
            .await?;
        Ok(result.modified_count)
    }

    async fn collect(&self, filter: Document) -> StoreResult<Vec<Bid>> {
        let cursor = self.bids.find(filter).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;
        docs.into_iter()
            .map(|d| Ok(mongodb::bson::from_document(d)?))
            .collect()
    }
}

/// Filter for bids placed by a bidder.
pub(crate) fn bidder_filter(email: &str) -> Document {
    doc! { "email": email }
}

/// Filter for bids against a buyer's jobs.
pub(crate) fn job_owner_filter(email: &str) -> Document {
    doc! { "buyer.email": email }
}

/// Filter for the duplicate-bid guard.
pub(crate) fn duplicate_filter(email: &str, job_id: ObjectId) -> Document {
    doc! { "email": email, "job_id": job_id }
}

/// Update document that touches only the status field.
pub(crate) fn status_update(status: &str) -> Document {
    doc! { "$set": { "status": status } }
}
