//! Group manager gateway - entry point.
//!
//! Startup order:
//!
//! - logging
//! - configuration (fails fast on missing widget credentials or backend URL)
//! - interceptor registration, which installs and activates it
//! - serve: `/` and `/api/*` from the proxy, everything else from `STATIC_DIR`

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use gigya_groups::{build_app, build_interceptor, static_files, AppState, Config};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,gigya_groups=debug".to_string()),
        )
        .with_target(true)
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    let bind_addr = config.bind_addr;
    let static_dir = config.static_dir.clone();
    let function_url = config.function_url();

    let state = Arc::new(AppState::from_config(config));
    let interceptor = build_interceptor(state);

    // The server is the only "page"; it registers from the root, outside the scope.
    if let Err(e) = interceptor.register_from("/") {
        error!("Interceptor registration failed: {}", e);
    }

    let app = build_app(interceptor.clone(), static_files(&static_dir));

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    info!("Group manager running at http://{}", bind_addr);
    info!("Backend function: {}", function_url);
    info!("Static directory: {}", static_dir);
    info!(
        "Interceptor: {} (scope {})",
        interceptor.state().as_str(),
        interceptor.scope()
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
