// crates/server/src/routes/upload.rs
//! Upload intake: store the payload bytes and create a queued job record.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use vidscale_core::StoreError;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// File name used when the client supplies none.
const DEFAULT_FILE_NAME: &str = "upload.mp4";

/// Requested output heights below this are raised to it.
const MIN_TARGET_HEIGHT: u32 = 1080;

/// Response for a successful upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct UploadResponse {
    pub job_id: String,
}

/// POST /upload - Multipart intake.
///
/// Required part `file` (the video payload; its file name becomes the job's
/// `originalName`). Optional part `targetHeight`: an integer, floored to 1080
/// when numeric and ignored otherwise — it is forwarded on the record for the
/// worker, never consumed here.
///
/// The record is created before the payload is written; a payload write
/// failure leaves a queued record pointing at a missing input file.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let mut file: Option<(String, Bytes)> = None;
    let mut target_height: Option<u32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart payload: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_FILE_NAME)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to read file: {e}")))?;
                file = Some((name, data));
            }
            Some("targetHeight") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to read field: {e}")))?;
                // Non-numeric values are ignored, not rejected.
                target_height = text.trim().parse::<u32>().ok().map(|h| h.max(MIN_TARGET_HEIGHT));
            }
            _ => {}
        }
    }

    let (original_name, data) = file.ok_or(ApiError::MissingFile)?;

    let record = state.store.create(&original_name, target_height).await?;
    let input_path = state.store.layout().resolve(&record.input_path)?;
    tokio::fs::write(&input_path, &data)
        .await
        .map_err(|e| ApiError::Store(StoreError::io(&input_path, e)))?;

    info!(
        job_id = %record.id,
        original_name = %original_name,
        bytes = data.len(),
        target_height = ?target_height,
        "upload accepted"
    );

    Ok(Json(UploadResponse { job_id: record.id }))
}

/// Build the upload router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/upload", post(upload))
}
