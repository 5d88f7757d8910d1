//! Service binding interpolation.

use std::sync::Arc;

use super::transport::CredHubTransport;
use super::{decode, encode, execute};
use crate::api::{routes, ApiRequest, ServicesData};
use crate::errors::Result;

/// Resolves `credhub-ref` entries in service binding data
pub struct InterpolationOperations<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: ?Sized> Clone for InterpolationOperations<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport) }
    }
}

impl<T: CredHubTransport + ?Sized> InterpolationOperations<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Send binding data and get it back with every reference replaced by the
    /// referenced credential's value.
    pub async fn interpolate_service_data(&self, services: &ServicesData) -> Result<ServicesData> {
        let request = ApiRequest::post(routes::INTERPOLATE).body(encode(services)?);
        let body = execute(&*self.transport, "interpolate_service_data", request).await?;
        decode(body, "interpolate_service_data")
    }
}
