//! Server information.

use std::sync::Arc;

use super::transport::CredHubTransport;
use super::{decode, execute};
use crate::api::{routes, ApiRequest, VersionInfo};
use crate::errors::Result;

pub struct InfoOperations<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: ?Sized> Clone for InfoOperations<T> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport) }
    }
}

impl<T: CredHubTransport + ?Sized> InfoOperations<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Version of the server.
    pub async fn version(&self) -> Result<VersionInfo> {
        let request = ApiRequest::get(routes::VERSION);
        let body = execute(&*self.transport, "version", request).await?;
        decode(body, "version")
    }
}
