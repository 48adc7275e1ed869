//! Axum HTTP API server for the SoloSphere job marketplace.
//!
//! This crate provides:
//! - Cookie-carried JWT authentication with per-route ownership checks
//! - Job and bid CRUD handlers over the MongoDB store
//! - CORS restricted to the configured frontend origin, with credentials

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
