// crates/server/src/routes/download.rs
//! Download egress: stream the completed output file for a job.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::header,
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::info;
use vidscale_core::JobStatus;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for GET /download.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct DownloadQuery {
    pub id: Option<String>,
}

/// GET /download?id= - Stream the output file for a completed job.
///
/// Gating happens before any filesystem access: the record must exist, be
/// `completed`, and carry a non-empty output path — a queued, processing, or
/// failed job is never downloadable even if an output file happens to exist.
/// A completed record whose file is missing is an inconsistent state and maps
/// to not-found.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
) -> ApiResult<Response> {
    let id = query.id.filter(|id| !id.is_empty()).ok_or(ApiError::MissingId)?;
    let record = state.store.read(&id).await?;

    if record.status != JobStatus::Completed || record.output_path.is_empty() {
        return Err(ApiError::NotReady(id));
    }

    let output_path = state.store.layout().resolve(&record.output_path)?;
    let metadata = tokio::fs::metadata(&output_path)
        .await
        .map_err(|_| ApiError::OutputMissing(id.clone()))?;
    let file = tokio::fs::File::open(&output_path)
        .await
        .map_err(|_| ApiError::OutputMissing(id.clone()))?;

    info!(job_id = %id, bytes = metadata.len(), "streaming output");

    let body = Body::from_stream(ReaderStream::new(file));
    let response = Response::builder()
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, metadata.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"upscaled-{id}.mp4\""),
        )
        .body(body)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(response)
}

/// Build the download router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/download", get(download))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_creation() {
        let _router = router();
    }

    #[test]
    fn test_download_query_id_optional() {
        let query: DownloadQuery = serde_json::from_str("{}").unwrap();
        assert!(query.id.is_none());
    }
}
