//! SciChat dashboard server.
//!
//! Configuration comes from the environment:
//!
//! - `SCICHAT_BACKEND_URL`: base URL of the Q&A backend (default `http://127.0.0.1:8000`)
//! - `SCICHAT_BIND`: listen address (default `127.0.0.1:3000`)
//! - `SCICHAT_REQUEST_TIMEOUT_SECS`: per-request backend timeout (default 120)
//! - `SCICHAT_MAX_UPLOAD_MB`: largest accepted upload (default 64)
//!
//! Log verbosity follows `RUST_LOG`.

use std::sync::Arc;

use scichat::{config::Config, handlers, AppState, HttpBackend};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("scichat=info,tower_http=info"))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    let backend = HttpBackend::new(&config)?;
    let bind_addr = config.bind_addr;
    let backend_url = config.backend_url.clone();

    let state = Arc::new(AppState::new(config, Arc::new(backend)));
    let loaded = state.load_papers().await;
    tracing::info!(papers = loaded, backend = %backend_url, "loaded papers");

    let app = handlers::app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("SciChat dashboard running at http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
