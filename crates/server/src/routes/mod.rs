//! API route handlers for the vidscale server.

pub mod download;
pub mod health;
pub mod status;
pub mod upload;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router.
///
/// Routes:
/// - POST /upload - Multipart intake: store the payload, create a queued job
/// - GET /status?id= - Full job record for one id
/// - GET /latest - Most recently modified job record
/// - GET /download?id= - Stream the completed output file
/// - GET /health - Health check
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(upload::router())
        .merge(status::router())
        .merge(download::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidscale_core::{JobStore, StorageLayout};

    #[test]
    fn test_api_routes_creation() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(JobStore::new(StorageLayout::new(dir.path())));
        let _router = api_routes(state);
    }
}
