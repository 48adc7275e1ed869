//! API routes.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::auth::{login, logout};
use crate::handlers::bids::{create_bid, list_bid_requests, list_my_bids, update_bid_status};
use crate::handlers::health::{health, ready};
use crate::handlers::jobs::{
    create_job, delete_job, get_job, list_buyer_jobs, list_jobs, upsert_job,
};
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
///
/// This is the canonical route table: the ownership check runs on every
/// route whose path parameter is a caller-owned email, with no exceptions.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/jwt", post(login))
        .route("/logout", get(logout));

    let job_routes = Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs/:id", get(get_job))
        .route("/job", post(create_job))
        // The parameter is a buyer email for GET, a job id for PUT and
        // DELETE; axum requires one registration per path shape
        .route(
            "/job/:key",
            get(list_buyer_jobs).put(upsert_job).delete(delete_job),
        );

    let bid_routes = Router::new()
        .route("/bid", post(create_bid))
        .route("/bid-request/:email", get(list_bid_requests))
        // Same duality: bidder email for GET, bid id for PATCH
        .route("/bids/:key", get(list_my_bids).patch(update_bid_status));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    Router::new()
        .merge(auth_routes)
        .merge(job_routes)
        .merge(bid_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origin))
        .with_state(state)
}
