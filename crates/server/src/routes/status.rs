// crates/server/src/routes/status.rs
//! Status endpoints: per-job lookup and the most recently modified job.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use vidscale_core::JobRecord;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for GET /status.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StatusQuery {
    pub id: Option<String>,
}

/// GET /status?id= - Return the full job record verbatim.
///
/// All fields pass through, including `error` when the worker set one.
pub async fn job_status(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<JobRecord>> {
    let id = query.id.filter(|id| !id.is_empty()).ok_or(ApiError::MissingId)?;
    let record = state.store.read(&id).await?;
    Ok(Json(record))
}

/// GET /latest - Return the job record whose file was most recently modified.
///
/// Modification time, not the record's own timestamps: the worker rewrites
/// records without necessarily bumping `updatedAt`.
pub async fn latest_job(State(state): State<Arc<AppState>>) -> ApiResult<Json<JobRecord>> {
    let record = state.store.latest().await?;
    Ok(Json(record))
}

/// Build the status router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(job_status))
        .route("/latest", get(latest_job))
}
