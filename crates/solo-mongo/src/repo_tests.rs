//! Tests for repository filter/update builders and document mapping.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson};
use serde_json::json;

use solo_models::{BidPayload, JobPayload};

use crate::bid_repo::{bidder_filter, duplicate_filter, job_owner_filter, status_update};
use crate::error::{parse_object_id, StoreError};
use crate::job_repo::buyer_email_filter;

// =============================================================================
// Filter Builders
// =============================================================================

#[test]
fn test_buyer_email_filter_uses_dotted_path() {
    let filter = buyer_email_filter("buyer@example.com");
    assert_eq!(filter, doc! { "buyer.email": "buyer@example.com" });
}

#[test]
fn test_bidder_and_job_owner_filters_target_different_keys() {
    assert_eq!(
        bidder_filter("worker@example.com"),
        doc! { "email": "worker@example.com" }
    );
    assert_eq!(
        job_owner_filter("buyer@example.com"),
        doc! { "buyer.email": "buyer@example.com" }
    );
}

#[test]
fn test_duplicate_filter_pairs_bidder_and_job() {
    let job_id = ObjectId::new();
    let filter = duplicate_filter("worker@example.com", job_id);
    assert_eq!(filter, doc! { "email": "worker@example.com", "job_id": job_id });
}

#[test]
fn test_status_update_touches_only_the_status_field() {
    let update = status_update("accepted");
    assert_eq!(update, doc! { "$set": { "status": "accepted" } });

    // The $set document must not reach any other field
    let set = update.get_document("$set").unwrap();
    assert_eq!(set.len(), 1);
}

// =============================================================================
// Id Parsing
// =============================================================================

#[test]
fn test_parse_object_id_accepts_hex_and_rejects_garbage() {
    let oid = ObjectId::new();
    assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);

    let err = parse_object_id("not-a-hex-id").unwrap_err();
    assert!(matches!(err, StoreError::InvalidId(_)));
    assert!(!err.is_duplicate());
}

// =============================================================================
// Document Mapping
// =============================================================================

#[test]
fn test_job_payload_maps_to_document_with_extras() {
    let payload: JobPayload = serde_json::from_value(json!({
        "buyer": { "email": "buyer@example.com", "name": "Ada" },
        "job_title": "Landing page",
        "max_price": 250
    }))
    .unwrap();

    let doc = mongodb::bson::to_document(&payload).unwrap();
    assert_eq!(
        doc.get_document("buyer").unwrap().get_str("email").unwrap(),
        "buyer@example.com"
    );
    assert_eq!(doc.get_str("job_title").unwrap(), "Landing page");
    assert_eq!(doc.get("max_price"), Some(&Bson::Int64(250)));
}

#[test]
fn test_bid_payload_job_id_serializes_as_string_before_rewrite() {
    // insert() replaces the hex string with a real ObjectId; the raw
    // payload document must carry it as a string so the rewrite is explicit.
    let payload: BidPayload = serde_json::from_value(json!({
        "email": "worker@example.com",
        "job_id": "66a0f1e2d3c4b5a69788aabb",
        "buyer": { "email": "buyer@example.com" }
    }))
    .unwrap();

    let doc = mongodb::bson::to_document(&payload).unwrap();
    assert_eq!(doc.get_str("job_id").unwrap(), "66a0f1e2d3c4b5a69788aabb");
    assert_eq!(doc.get_str("status").unwrap(), "pending");
}

// =============================================================================
// Error Classification
// =============================================================================

#[test]
fn test_duplicate_bid_error_is_duplicate() {
    let err = StoreError::DuplicateBid("worker@example.com".to_string());
    assert!(err.is_duplicate());
    assert!(err.to_string().contains("worker@example.com"));
}

// =============================================================================
// Config
// =============================================================================

mod config {
    use serial_test::serial;

    use crate::client::MongoConfig;

    #[test]
    #[serial]
    fn test_mongo_config_defaults() {
        std::env::remove_var("MONGODB_URI");
        std::env::remove_var("MONGODB_DATABASE");

        let config = MongoConfig::from_env();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "solosphere");
    }

    #[test]
    #[serial]
    fn test_mongo_config_reads_env() {
        std::env::set_var("MONGODB_URI", "mongodb://db.internal:27017");
        std::env::set_var("MONGODB_DATABASE", "solosphere_test");

        let config = MongoConfig::from_env();
        assert_eq!(config.uri, "mongodb://db.internal:27017");
        assert_eq!(config.database, "solosphere_test");

        std::env::remove_var("MONGODB_URI");
        std::env::remove_var("MONGODB_DATABASE");
    }
}
