// crates/server/src/lib.rs
//! Vidscale server library.
//!
//! Axum-based HTTP front-end for the video-upscaling pipeline: clients upload
//! a video, poll job status, and download the upscaled result. The actual
//! transcoding is done by an external worker process that shares the storage
//! root and mutates job records directly on disk.

pub mod error;
pub mod routes;
pub mod state;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use vidscale_core::JobStore;

/// Maximum accepted upload size. Raw video payloads run large.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024 * 1024;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (upload, status, latest, download, health)
/// - CORS for development (allows any origin)
/// - Request tracing
/// - A body limit large enough for video uploads
pub fn create_app(store: JobStore) -> Router {
    let state = AppState::new(store);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
