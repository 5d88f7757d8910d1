//! Server endpoints as path templates.
//!
//! Templates use `{placeholder}` markers that [`ApiRequest::path`] fills from
//! the request's variables, in order.

use http::Method;
use serde_json::Value;

use crate::errors::{CredHubError, Result};

pub const DATA: &str = "/api/v1/data";
pub const DATA_BY_ID: &str = "/api/v1/data/{id}";
pub const DATA_BY_NAME: &str = "/api/v1/data?name={name}";
pub const DATA_CURRENT_BY_NAME: &str = "/api/v1/data?name={name}&current=true";
pub const DATA_VERSIONS_BY_NAME: &str = "/api/v1/data?name={name}&versions={versions}";
pub const DATA_NAME_LIKE: &str = "/api/v1/data?name-like={name}";
pub const DATA_BY_PATH: &str = "/api/v1/data?path={path}";
pub const DATA_PATHS: &str = "/api/v1/data?paths=true";
pub const REGENERATE: &str = "/api/v1/regenerate";
pub const BULK_REGENERATE: &str = "/api/v1/bulk-regenerate";
pub const INTERPOLATE: &str = "/api/v1/interpolate";

pub const PERMISSIONS_V1: &str = "/api/v1/permissions";
pub const PERMISSIONS_V1_BY_NAME: &str = "/api/v1/permissions?credential_name={name}";
pub const PERMISSIONS_V1_BY_NAME_AND_ACTOR: &str =
    "/api/v1/permissions?credential_name={name}&actor={actor}";

pub const PERMISSIONS_V2: &str = "/api/v2/permissions";
pub const PERMISSIONS_V2_BY_ID: &str = "/api/v2/permissions/{uuid}";
pub const PERMISSIONS_V2_BY_PATH_AND_ACTOR: &str = "/api/v2/permissions?path={path}&actor={actor}";

pub const CERTIFICATES: &str = "/api/v1/certificates";
pub const CERTIFICATES_BY_NAME: &str = "/api/v1/certificates?name={name}";
pub const CERTIFICATE_REGENERATE: &str = "/api/v1/certificates/{id}/regenerate";
pub const CERTIFICATE_TRANSITIONAL_VERSION: &str =
    "/api/v1/certificates/{id}/update_transitional_version";

pub const INFO: &str = "/info";
pub const VERSION: &str = "/version";

/// A request the transport should send: method, path and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    template: &'static str,
    variables: Vec<String>,
    body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, template: &'static str) -> Self {
        Self { method, template, variables: Vec::new(), body: None }
    }

    pub fn get(template: &'static str) -> Self {
        Self::new(Method::GET, template)
    }

    pub fn post(template: &'static str) -> Self {
        Self::new(Method::POST, template)
    }

    pub fn put(template: &'static str) -> Self {
        Self::new(Method::PUT, template)
    }

    pub fn delete(template: &'static str) -> Self {
        Self::new(Method::DELETE, template)
    }

    /// Append the next positional variable.
    pub fn var(mut self, value: impl ToString) -> Self {
        self.variables.push(value.to_string());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn json_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Fill the template's placeholders with the URL-encoded variables.
    ///
    /// # Errors
    ///
    /// [`CredHubError::InvalidArgument`] when the number of variables does not
    /// match the number of placeholders.
    pub fn path(&self) -> Result<String> {
        let mut path = String::with_capacity(self.template.len());
        let mut variables = self.variables.iter();
        let mut rest = self.template;

        while let Some(start) = rest.find('{') {
            let end = rest[start..].find('}').map(|offset| start + offset).ok_or_else(|| {
                CredHubError::invalid_argument(format!("unterminated placeholder in {}", self.template))
            })?;
            let value = variables.next().ok_or_else(|| {
                CredHubError::invalid_argument(format!(
                    "missing value for {} in {}",
                    &rest[start..=end],
                    self.template
                ))
            })?;
            path.push_str(&rest[..start]);
            path.push_str(&urlencoding::encode(value));
            rest = &rest[end + 1..];
        }
        path.push_str(rest);

        if variables.next().is_some() {
            return Err(CredHubError::invalid_argument(format!(
                "too many values for {}",
                self.template
            )));
        }
        Ok(path)
    }
}
