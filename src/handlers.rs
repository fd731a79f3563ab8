//! HTTP route handlers for the proxy.
//!
//! Every route here is reached only through the interceptor; see
//! [`crate::intercept`].

use crate::backend::search_groups as call_groups_search;
use crate::templates::{render_groups_payload, render_landing, WidgetSettings};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Router
// ============================================================================

pub fn proxy_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/groups", get(search_groups).post(search_groups))
        .route("/api/groups/fragment", get(groups_fragment))
        .with_state(state)
}

// ============================================================================
// Landing Page
// ============================================================================

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_landing(WidgetSettings {
        api_key: &state.config.api_key,
        domain: &state.config.domain,
    }))
}

// ============================================================================
// Group Search
// ============================================================================

/// Status and JSON body of one group search, shared by both group routes.
async fn groups_payload(state: &AppState) -> (StatusCode, Value) {
    match call_groups_search(state.backend.as_ref()).await {
        Ok(body) => {
            info!("Group search returned {} record(s)", result_len(&body));
            (StatusCode::OK, body)
        }
        Err(e) => {
            let (status, body) = e.into_status_body();
            (status, json!({ "error": body.error }))
        }
    }
}

/// `GET` and `POST /api/groups`. The request body, if any, is ignored.
pub async fn search_groups(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let (status, body) = groups_payload(&state).await;
    (status, Json(body))
}

/// Server-rendered variant of the page's render routine, fed the same
/// status and body `/api/groups` answers with.
pub async fn groups_fragment(State(state): State<Arc<AppState>>) -> Html<String> {
    let (status, body) = groups_payload(&state).await;
    Html(render_groups_payload(status.as_u16(), &body))
}

fn result_len(body: &Value) -> usize {
    body.get("results")
        .and_then(|r| r.as_array())
        .map(|a| a.len())
        .unwrap_or(0)
}
