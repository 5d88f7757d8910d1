//! The transport seam.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::api::ApiRequest;
use crate::errors::Result;

/// Sends requests to a credential server.
///
/// This is the only point where the crate touches the network. Implementations
/// own connection handling, authentication and TLS; they resolve the request
/// path (see [`ApiRequest::path`] and
/// [`CredHubConfig::endpoint`](crate::config::CredHubConfig::endpoint)),
/// send the optional JSON body and return the decoded response body.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use credhub_model::{ApiRequest, CredHubConfig, CredHubError, CredHubTransport, Result};
/// use async_trait::async_trait;
///
/// struct HttpTransport {
///     config: CredHubConfig,
///     http: MyHttpClient,
/// }
///
/// #[async_trait]
/// impl CredHubTransport for HttpTransport {
///     async fn send(&self, request: ApiRequest) -> Result<Option<serde_json::Value>> {
///         let url = self.config.endpoint(&request)?;
///         let response = self.http.call(request.method(), url, request.json_body()).await
///             .map_err(|e| CredHubError::transport(e.to_string()))?;
///         if !response.status().is_success() {
///             return Err(CredHubError::http_status(response.status().as_u16(), response.text()));
///         }
///         Ok(response.json_or_empty())
///     }
/// }
/// ```
#[async_trait]
pub trait CredHubTransport: Send + Sync {
    /// Send a request.
    ///
    /// # Returns
    ///
    /// The response body, or `None` when the server sent no content.
    ///
    /// # Errors
    ///
    /// [`CredHubError::Transport`](crate::errors::CredHubError::Transport) for
    /// connection failures and non-success statuses.
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>>;
}

#[async_trait]
impl<T: CredHubTransport + ?Sized> CredHubTransport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<Option<Value>> {
        (**self).send(request).await
    }
}
