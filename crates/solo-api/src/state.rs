//! Application state.

use std::sync::Arc;

use solo_mongo::{BidRepository, JobRepository, MongoConfig, MongoStore};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<MongoStore>,
}

impl AppState {
    /// Create new application state: open the process-scoped database
    /// handle and make sure the bid uniqueness index exists.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let store = MongoStore::connect(&MongoConfig::from_env()).await?;

        BidRepository::new(&store).ensure_indexes().await?;

        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    /// Job repository over the shared handle.
    pub fn jobs(&self) -> JobRepository {
        JobRepository::new(&self.store)
    }

    /// Bid repository over the shared handle.
    pub fn bids(&self) -> BidRepository {
        BidRepository::new(&self.store)
    }
}
