//! MongoDB connection handle.
//!
//! The client is opened once at process start, pinged to confirm the
//! deployment is reachable, and shared across all requests for the life of
//! the process. The driver pools connections internally, so cloning the
//! store is cheap.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};
use tracing::info;

use crate::error::StoreResult;

/// MongoDB connection configuration.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string
    pub uri: String,
    /// Database name
    pub database: String,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "solosphere".to_string(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl MongoConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: std::env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "solosphere".to_string()),
            connect_timeout: Duration::from_secs(
                std::env::var("MONGODB_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}

/// Shared MongoDB handle: the client plus the application database.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect to MongoDB with the Stable API pinned to V1 and confirm the
    /// deployment is reachable with a ping.
    pub async fn connect(config: &MongoConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .build(),
        );
        options.connect_timeout = Some(config.connect_timeout);
        options.app_name = Some("solo-api".to_string());

        let client = Client::with_options(options)?;
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!(database = %config.database, "connected to MongoDB");

        let db = client.database(&config.database);
        Ok(Self { client, db })
    }

    /// Get a typed collection handle.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Liveness check for the readiness probe.
    pub async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
