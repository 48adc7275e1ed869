//! Job posting models.
//!
//! A job is a posted work item owned by a buyer. Beyond the ownership key
//! (`buyer.email`) and the document id, posting fields (title, description,
//! budget, deadline, category, ...) are an opaque payload that rides through
//! the API unchanged, so they are carried in a flattened map rather than
//! being modeled field by field.

use bson::oid::ObjectId;
use bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// The party that posted a job, embedded in both jobs and bids.
///
/// Only the email is meaningful to the backend (it is the ownership key);
/// anything else the frontend sends along (display name, photo URL) is
/// passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Buyer {
    #[validate(email)]
    pub email: String,

    /// Opaque extra fields, stored and returned verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A job document as stored in MongoDB and returned to clients.
///
/// The id serializes to clients as a 24-char hex string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,

    /// Job owner; `buyer.email` gates the per-buyer listing route.
    pub buyer: Buyer,

    /// Opaque posting fields (title, budget, deadline, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request payload for creating or replacing a job.
///
/// The id is never client-supplied: creation generates one and
/// replace-or-insert takes it from the path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobPayload {
    #[validate(nested)]
    pub buyer: Buyer,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_payload_passes_extra_fields_through() {
        let payload: JobPayload = serde_json::from_value(json!({
            "buyer": { "email": "buyer@example.com", "name": "Ada" },
            "job_title": "Landing page",
            "max_price": 250,
            "category": "Web Development"
        }))
        .unwrap();

        assert_eq!(payload.buyer.email, "buyer@example.com");
        assert_eq!(payload.buyer.extra["name"], json!("Ada"));
        assert_eq!(payload.extra["max_price"], json!(250));

        // Round back to JSON: nothing is lost or renamed
        let back = serde_json::to_value(&payload).unwrap();
        assert_eq!(back["category"], json!("Web Development"));
        assert_eq!(back["buyer"]["name"], json!("Ada"));
    }

    #[test]
    fn test_job_payload_validates_buyer_email() {
        let payload: JobPayload = serde_json::from_value(json!({
            "buyer": { "email": "not-an-email" },
            "job_title": "Logo"
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_job_id_serializes_as_hex_string() {
        let job = Job {
            id: ObjectId::parse_str("66a0f1e2d3c4b5a69788aabb").unwrap(),
            buyer: Buyer {
                email: "buyer@example.com".to_string(),
                extra: Map::new(),
            },
            extra: Map::new(),
        };

        let v = serde_json::to_value(&job).unwrap();
        assert_eq!(v["_id"], json!("66a0f1e2d3c4b5a69788aabb"));
    }

    #[test]
    fn test_job_deserializes_from_bson_document() {
        let doc = bson::doc! {
            "_id": ObjectId::new(),
            "buyer": { "email": "buyer@example.com" },
            "job_title": "API integration",
            "max_price": 900,
        };

        let job: Job = bson::from_document(doc).unwrap();
        assert_eq!(job.buyer.email, "buyer@example.com");
        assert_eq!(job.extra["job_title"], json!("API integration"));
    }
}
