//! MongoDB access layer for the SoloSphere backend.
//!
//! This crate provides:
//! - A shared, process-scoped connection handle (`MongoStore`)
//! - Typed repositories for jobs and bids
//! - The duplicate-bid guard (existence check + unique index)

pub mod bid_repo;
pub mod client;
pub mod error;
pub mod job_repo;

#[cfg(test)]
mod repo_tests;

pub use bid_repo::BidRepository;
pub use client::{MongoConfig, MongoStore};
pub use error::{StoreError, StoreResult};
pub use job_repo::{JobRepository, UpsertOutcome};
