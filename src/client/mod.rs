//! # Client Operations
//!
//! Typed operations over a [`CredHubTransport`]. Each operation group builds
//! an [`ApiRequest`], hands it to the transport inside a `credhub_request`
//! span and decodes the response body into typed envelopes. Transport errors
//! are returned unchanged; bodies that do not decode become
//! [`CredHubError::Deserialization`].
//!
//! # Example
//!
//! ```rust,ignore
//! use credhub_model::{CredHubClient, CredentialRequest, PasswordParameters, WriteMode};
//!
//! let client = CredHubClient::new(my_transport);
//! let request = CredentialRequest::builder()
//!     .name(CredentialName::new(["deploy", "db-password"])?)
//!     .parameters(PasswordParameters::builder().length(32).build()?)
//!     .mode(WriteMode::Converge)
//!     .build()?;
//! let generated = client.credentials().generate(&request).await?;
//! ```

pub mod certificates;
pub mod credentials;
pub mod info;
pub mod interpolation;
pub mod permissions;
pub mod permissions_v2;
pub mod transport;

pub use certificates::CertificateOperations;
pub use credentials::CredentialOperations;
pub use info::InfoOperations;
pub use interpolation::InterpolationOperations;
pub use permissions::PermissionOperations;
pub use permissions_v2::PermissionV2Operations;
pub use transport::CredHubTransport;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;

use crate::api::{ApiRequest, CredentialDetails};
use crate::domain::CredentialValueType;
use crate::errors::{CredHubError, Result};

/// Entry point grouping every operation over one shared transport.
pub struct CredHubClient<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: ?Sized> Clone for CredHubClient<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport) }
    }
}

impl<T: CredHubTransport> CredHubClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport: Arc::new(transport) }
    }
}

impl<T: CredHubTransport + ?Sized> CredHubClient<T> {
    pub fn from_arc(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub fn credentials(&self) -> CredentialOperations<T> {
        CredentialOperations::new(Arc::clone(&self.transport))
    }

    pub fn permissions(&self) -> PermissionOperations<T> {
        PermissionOperations::new(Arc::clone(&self.transport))
    }

    pub fn permissions_v2(&self) -> PermissionV2Operations<T> {
        PermissionV2Operations::new(Arc::clone(&self.transport))
    }

    pub fn certificates(&self) -> CertificateOperations<T> {
        CertificateOperations::new(Arc::clone(&self.transport))
    }

    pub fn interpolation(&self) -> InterpolationOperations<T> {
        InterpolationOperations::new(Arc::clone(&self.transport))
    }

    pub fn info(&self) -> InfoOperations<T> {
        InfoOperations::new(Arc::clone(&self.transport))
    }
}

/// Send a request inside a span named after the operation.
pub(crate) async fn execute<T: CredHubTransport + ?Sized>(
    transport: &T,
    operation: &'static str,
    request: ApiRequest,
) -> Result<Option<Value>> {
    let span = crate::credhub_span!(request.method(), request.template(), operation = operation);

    async move {
        let result = transport.send(request).await;
        match &result {
            Ok(body) => tracing::debug!(has_body = body.is_some(), "CredHub request completed"),
            Err(e) => tracing::debug!(error = %e, "CredHub request failed"),
        }
        result
    }
    .instrument(span)
    .await
}

/// Encode a request body.
pub(crate) fn encode<B: serde::Serialize>(body: &B) -> Result<Value> {
    Ok(serde_json::to_value(body)?)
}

fn require_body(body: Option<Value>, context: &str) -> Result<Value> {
    body.ok_or_else(|| CredHubError::deserialization(format!("{}: empty response body", context)))
}

/// Decode a required response body.
pub(crate) fn decode<R: DeserializeOwned>(body: Option<Value>, context: &str) -> Result<R> {
    let body = require_body(body, context)?;
    serde_json::from_value(body).map_err(|e| CredHubError::decode(context, e))
}

/// Decode a single credential document.
pub(crate) fn decode_details<V: CredentialValueType>(
    body: Option<Value>,
    context: &str,
) -> Result<CredentialDetails<V>> {
    CredentialDetails::from_json(require_body(body, context)?)
}
