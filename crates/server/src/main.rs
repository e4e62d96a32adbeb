// crates/server/src/main.rs
//! Vidscale server binary.
//!
//! Binds the HTTP server over a storage root shared with the external
//! upscaling worker. The server only creates and reads job records; the
//! worker claims queued records and writes status/progress back to disk.

use std::net::SocketAddr;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use vidscale_core::{JobStore, StorageLayout};
use vidscale_server::create_app;

/// Default port for the server.
const DEFAULT_PORT: u16 = 4860;

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("VIDSCALE_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    eprintln!("\nvidscale v{}\n", env!("CARGO_PKG_VERSION"));

    // Materialize the storage layout up front so the worker and the first
    // request both find it in place.
    let layout = StorageLayout::from_env();
    layout.ensure().await?;
    eprintln!("  storage root: {}", layout.root().display());

    let store = JobStore::new(layout);
    let app = create_app(store);

    let port = get_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("  listening on http://localhost:{port}\n");

    axum::serve(listener, app).await?;

    Ok(())
}
