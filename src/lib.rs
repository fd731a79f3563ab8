//! Group manager gateway - library surface for the binary and the tests.
//!
//! The server answers `/` and `/api/*` itself through the interceptor and
//! serves everything else from a static directory.

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod intercept;
pub mod models;
pub mod templates;
pub mod url_validator;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<dyn IdentityBackend>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn IdentityBackend>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
        }
    }

    /// State wired to the real backend function from `config`.
    pub fn from_config(config: Config) -> Self {
        let backend = Arc::new(FunctionClient::new(config.function_url()));
        Self::new(config, backend)
    }
}

// ============================================================================
// Router Assembly
// ============================================================================

/// Build the interceptor around the proxy routes. Not yet registered.
pub fn build_interceptor(state: Arc<AppState>) -> Arc<Interceptor> {
    let scope = state.config.scope.clone();
    Arc::new(Interceptor::new(scope, handlers::proxy_router(state)))
}

/// Put `interceptor` in front of `network`, which sees only the paths the
/// interceptor lets through.
pub fn build_app(interceptor: Arc<Interceptor>, network: Router) -> Router {
    Router::new()
        .fallback_service(network)
        .layer(middleware::from_fn_with_state(interceptor, intercept::intercept))
        .layer(TraceLayer::new_for_http())
}

/// The "network" of a deployed server: files under `static_dir`.
pub fn static_files(static_dir: &str) -> Router {
    Router::new().fallback_service(ServeDir::new(static_dir))
}

// Re-export commonly used types
pub use backend::{search_groups, FunctionClient, IdentityBackend};
pub use config::{Config, ConfigError};
pub use error::{BackendError, LifecycleError};
pub use intercept::{
    is_intercepted, should_register, Interceptor, LifecycleState, RegistrationOutcome,
};
pub use models::{BackendRequest, ErrorBody, GroupRecord, SearchParams, SearchResult};
pub use templates::{render_groups_payload, render_landing, WidgetSettings};
pub use url_validator::{function_url, validate_base_url, UrlValidationError};
