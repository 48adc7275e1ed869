//! Bid API handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use validator::Validate;

use solo_models::{Bid, BidPayload, BidStatusUpdate};

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::handlers::jobs::InsertResponse;
use crate::state::AppState;

/// Partial-update acknowledgement.
#[derive(Serialize)]
pub struct UpdateResponse {
    pub acknowledged: bool,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

/// GET /bids/:email - bids placed by the caller. Ownership-gated.
pub async fn list_my_bids(
    State(state): State<AppState>,
    Path(email): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Bid>>> {
    user.require_owner(&email)?;

    let bids = state.bids().list_by_bidder(&email).await?;
    Ok(Json(bids))
}

/// GET /bid-request/:email - bids against the caller's job postings
/// (matched on the denormalized job-owner email). Ownership-gated.
pub async fn list_bid_requests(
    State(state): State<AppState>,
    Path(email): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Bid>>> {
    user.require_owner(&email)?;

    let bids = state.bids().list_by_job_owner(&email).await?;
    Ok(Json(bids))
}

/// POST /bid - submit a bid. A second bid for the same (email, job_id)
/// pair is rejected with the duplicate-bid error. Token-gated.
pub async fn create_bid(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(payload): Json<BidPayload>,
) -> ApiResult<Json<InsertResponse>> {
    payload.validate()?;

    let id = state.bids().insert(&payload).await?;
    Ok(Json(InsertResponse {
        acknowledged: true,
        inserted_id: id.to_hex(),
    }))
}

/// PATCH /bids/:id - update only the status field. An unknown id acks
/// with a zero modified count rather than failing. Token-gated.
pub async fn update_bid_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _user: AuthUser,
    Json(update): Json<BidStatusUpdate>,
) -> ApiResult<Json<UpdateResponse>> {
    update.validate()?;

    let modified = state.bids().update_status(&id, &update.status).await?;
    Ok(Json(UpdateResponse {
        acknowledged: true,
        modified_count: modified,
    }))
}
