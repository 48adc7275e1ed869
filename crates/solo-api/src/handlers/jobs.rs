//! Job API handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use validator::Validate;

use solo_models::{Job, JobPayload};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Insert acknowledgement, shaped like the MongoDB driver acks the
/// frontend consumes.
#[derive(Serialize)]
pub struct InsertResponse {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

/// Replace-or-insert acknowledgement.
#[derive(Serialize)]
pub struct UpsertResponse {
    pub acknowledged: bool,
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
    #[serde(rename = "upsertedId", skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

/// Delete acknowledgement.
#[derive(Serialize)]
pub struct DeleteResponse {
    pub acknowledged: bool,
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

/// GET /jobs - every job, unfiltered.
pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.jobs().list_all().await?;
    Ok(Json(jobs))
}

/// GET /jobs/:id - single job by id; 404 when absent.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Job>> {
    let job = state
        .jobs()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("job not found"))?;
    Ok(Json(job))
}

/// GET /job/:email - jobs posted by the caller. Ownership-gated: the
/// verified identity must match the email in the path.
pub async fn list_buyer_jobs(
    State(state): State<AppState>,
    Path(email): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Job>>> {
    user.require_owner(&email)?;

    let jobs = state.jobs().list_by_buyer(&email).await?;
    Ok(Json(jobs))
}

/// POST /job - store a new job posting.
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<JobPayload>,
) -> ApiResult<Json<InsertResponse>> {
    payload.validate()?;

    let id = state.jobs().insert(&payload).await?;
    Ok(Json(InsertResponse {
        acknowledged: true,
        inserted_id: id.to_hex(),
    }))
}

/// PUT /job/:id - full-document replace of the job, inserting when the id
/// is unknown (last write wins). Token-gated.
pub async fn upsert_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _user: AuthUser,
    Json(payload): Json<JobPayload>,
) -> ApiResult<Json<UpsertResponse>> {
    payload.validate()?;

    let outcome = state.jobs().upsert(&id, &payload).await?;
    Ok(Json(UpsertResponse {
        acknowledged: true,
        matched_count: outcome.matched,
        modified_count: outcome.modified,
        upserted_id: outcome.upserted_id.map(|oid| oid.to_hex()),
    }))
}

/// DELETE /job/:id - remove the job; deleting an absent id still acks.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = state.jobs().delete(&id).await?;
    Ok(Json(DeleteResponse {
        acknowledged: true,
        deleted_count: deleted,
    }))
}
