//! Outbound client for the backend function.
//!
//! The proxy talks to the identity API only through [`IdentityBackend`], so
//! handlers can be driven against an in-memory backend in tests while the
//! server uses [`FunctionClient`].

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::BackendError;
use crate::models::BackendRequest;

#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Run one remote operation and return its JSON result untouched.
    async fn call(&self, request: &BackendRequest) -> Result<Value, BackendError>;
}

/// POSTs `{endpoint, params}` to `<base>/functions/v1/gigya-api`.
#[derive(Debug, Clone)]
pub struct FunctionClient {
    client: reqwest::Client,
    url: Url,
}

impl FunctionClient {
    pub fn new(url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl IdentityBackend for FunctionClient {
    async fn call(&self, request: &BackendRequest) -> Result<Value, BackendError> {
        debug!("POST {} endpoint={}", self.url, request.endpoint);

        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Rejected(status.as_u16()));
        }

        let body = response.json::<Value>().await?;
        Ok(body)
    }
}

/// Run the fixed "search groups" operation.
pub async fn search_groups(backend: &dyn IdentityBackend) -> Result<Value, BackendError> {
    backend.call(&BackendRequest::groups_search()).await
}
