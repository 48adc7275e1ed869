//! Bid models.
//!
//! A bid is a worker's offer against a specific job. It is owned by the
//! bidder (`email`) and carries a denormalized copy of the job owner
//! (`buyer`), captured at submission time, so "bids on my jobs" queries
//! never have to join back to the jobs collection.

use bson::oid::ObjectId;
use bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::job::Buyer;

/// Status assigned to a bid on submission.
pub const DEFAULT_BID_STATUS: &str = "pending";

/// A bid document as stored in MongoDB and returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,

    /// Bidder identity; ownership key for the "my bids" route.
    pub email: String,

    /// Weak reference to the job this bid targets. Deleting the job does
    /// not cascade here.
    #[serde(serialize_with = "serialize_object_id_as_hex_string")]
    pub job_id: ObjectId,

    /// Job owner, denormalized at bid-creation time.
    pub buyer: Buyer,

    /// Mutable status, updated independently of the other fields.
    pub status: String,

    /// Opaque extra fields (price, comment, deadline, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request payload for submitting a bid.
///
/// `job_id` arrives as the hex form of the target job's id; the store layer
/// parses it before writing so the reference is a real ObjectId.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BidPayload {
    #[validate(email)]
    pub email: String,

    pub job_id: String,

    #[validate(nested)]
    pub buyer: Buyer,

    #[serde(default = "default_status")]
    #[validate(length(min = 1, max = 64))]
    pub status: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_status() -> String {
    DEFAULT_BID_STATUS.to_string()
}

/// Partial update for a bid: only the status field is touched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BidStatusUpdate {
    #[validate(length(min = 1, max = 64))]
    pub status: String,
}
