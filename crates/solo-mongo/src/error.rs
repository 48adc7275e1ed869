//! Store error types.

use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the MongoDB layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a bid by {0} already exists for this job")]
    DuplicateBid(String),

    #[error("invalid document id: {0}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("serialization error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),

    #[error("deserialization error: {0}")]
    BsonDe(#[from] mongodb::bson::de::Error),
}

impl StoreError {
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    /// True when the error is the duplicate-bid rejection, in either form:
    /// the pre-insert guard or the unique-index write error.
    pub fn is_duplicate(&self) -> bool {
        match self {
            StoreError::DuplicateBid(_) => true,
            StoreError::Mongo(err) => is_duplicate_key(err),
            _ => false,
        }
    }
}

/// MongoDB duplicate-key write errors carry server code 11000.
pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_err)) if write_err.code == 11000
    )
}

/// Parse a client-supplied hex id into an ObjectId.
pub(crate) fn parse_object_id(id: &str) -> StoreResult<mongodb::bson::oid::ObjectId> {
    mongodb::bson::oid::ObjectId::parse_str(id).map_err(|_| StoreError::invalid_id(id))
}
