//! Shared data models for the SoloSphere backend.
//!
//! This crate provides Serde-serializable types for:
//! - Job postings and their buyers
//! - Bids and bid status updates
//! - Request payloads with validation rules

pub mod bid;
pub mod job;

// Re-export common types
pub use bid::{Bid, BidPayload, BidStatusUpdate, DEFAULT_BID_STATUS};
pub use job::{Buyer, Job, JobPayload};
