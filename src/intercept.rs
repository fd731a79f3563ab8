//! Request interception.
//!
//! The interceptor is a routing middleware in front of the server's fallback
//! ("network", the static asset directory). Requests for `/` and `/api/*`
//! are answered by the proxy router and never reach the fallback; all other
//! paths pass through untouched.
//!
//! It only answers once it is active. The lifecycle runs in one direction:
//!
//! ```text
//! Unregistered -> Installing -> Installed -> Active
//! ```
//!
//! Installation skips the waiting phase and activation claims every request
//! from then on, so after startup there is no window where intercepted paths
//! fall through. Until then, intercepted paths get an error instead: JSON
//! `{error}` under `/api/`, the registration error page otherwise.

use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Json, Response},
    Router,
};
use tower::ServiceExt;
use tracing::{debug, info, warn};

use crate::error::LifecycleError;
use crate::models::ErrorBody;
use crate::templates::registration_error_page;

/// Prefix of every proxied API route.
pub const API_PREFIX: &str = "/api/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LifecycleState {
    Unregistered = 0,
    Installing = 1,
    Installed = 2,
    Active = 3,
}

impl LifecycleState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => LifecycleState::Installing,
            2 => LifecycleState::Installed,
            3 => LifecycleState::Active,
            _ => LifecycleState::Unregistered,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Unregistered => "unregistered",
            LifecycleState::Installing => "installing",
            LifecycleState::Installed => "installed",
            LifecycleState::Active => "active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The caller already runs inside the scope; nothing was attempted.
    Skipped,
    Registered,
}

/// True for the paths the interceptor answers itself.
pub fn is_intercepted(path: &str) -> bool {
    path == "/" || path.starts_with(API_PREFIX)
}

/// A page inside the interceptor's scope must not register it again.
///
/// Scope matching is a plain string prefix, so `/swap` is inside `/sw`.
pub fn should_register(current_path: &str, scope: &str) -> bool {
    !current_path.starts_with(scope)
}

pub struct Interceptor {
    scope: String,
    proxy: Router,
    state: AtomicU8,
    registrations: AtomicU64,
    dispatched: AtomicU64,
    failure: Mutex<Option<String>>,
}

impl Interceptor {
    pub fn new(scope: impl Into<String>, proxy: Router) -> Self {
        Self {
            scope: scope.into(),
            proxy,
            state: AtomicU8::new(LifecycleState::Unregistered as u8),
            registrations: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            failure: Mutex::new(None),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_active(&self) -> bool {
        self.state() == LifecycleState::Active
    }

    /// Registration attempts that reached the lifecycle.
    pub fn registration_attempts(&self) -> u64 {
        self.registrations.load(Ordering::Relaxed)
    }

    /// Requests answered by the proxy router.
    pub fn dispatch_count(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    pub fn last_failure(&self) -> Option<String> {
        self.failure.lock().ok().and_then(|f| f.clone())
    }

    fn transition(
        &self,
        from: LifecycleState,
        to: LifecycleState,
        action: &'static str,
    ) -> Result<(), LifecycleError> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| debug!("Interceptor {} -> {}", from.as_str(), to.as_str()))
            .map_err(|current| LifecycleError::InvalidTransition {
                action,
                state: LifecycleState::from_u8(current).as_str(),
            })
    }

    pub fn register(&self) -> Result<(), LifecycleError> {
        self.registrations.fetch_add(1, Ordering::Relaxed);
        match self.transition(LifecycleState::Unregistered, LifecycleState::Installing, "register") {
            Ok(()) => Ok(()),
            Err(_) => Err(LifecycleError::AlreadyRegistered),
        }
    }

    /// Finish installing and activate right away instead of waiting.
    pub fn install(&self) -> Result<(), LifecycleError> {
        self.transition(LifecycleState::Installing, LifecycleState::Installed, "install")?;
        self.activate()
    }

    /// Take over every request from now on.
    pub fn activate(&self) -> Result<(), LifecycleError> {
        self.transition(LifecycleState::Installed, LifecycleState::Active, "activate")?;
        info!("Interceptor active, claiming / and {}*", API_PREFIX);
        Ok(())
    }

    /// Register on behalf of a page at `current_path`.
    pub fn register_from(&self, current_path: &str) -> Result<RegistrationOutcome, LifecycleError> {
        if !should_register(current_path, &self.scope) {
            debug!("{} is inside scope {}, not registering", current_path, self.scope);
            return Ok(RegistrationOutcome::Skipped);
        }

        let result = self.register().and_then(|_| self.install());
        match result {
            Ok(()) => Ok(RegistrationOutcome::Registered),
            Err(e) => {
                warn!("Interceptor registration failed: {}", e);
                if let Ok(mut failure) = self.failure.lock() {
                    *failure = Some(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Answer a request with the proxy router.
    pub async fn dispatch(&self, request: Request) -> Response {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
        let result: Result<Response, Infallible> = self.proxy.clone().oneshot(request).await;
        match result {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }

    /// JSON `{error}` for API callers, the error page for everything else.
    fn not_active_response(&self, path: &str) -> Response {
        let message = self.last_failure().unwrap_or_else(|| {
            format!(
                "Interceptor is {}, not controlling requests",
                self.state().as_str()
            )
        });
        if path.starts_with(API_PREFIX) {
            let body = Json(ErrorBody { error: message });
            return (StatusCode::SERVICE_UNAVAILABLE, body).into_response();
        }
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Html(registration_error_page(&message)),
        )
            .into_response()
    }
}

/// Middleware: route intercepted paths to the proxy, pass the rest through.
pub async fn intercept(
    State(interceptor): State<Arc<Interceptor>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if !is_intercepted(path) {
        return next.run(request).await;
    }

    if !interceptor.is_active() {
        warn!("Request for {} while interceptor is {}", path, interceptor.state().as_str());
        return interceptor.not_active_response(path);
    }

    interceptor.dispatch(request).await
}
