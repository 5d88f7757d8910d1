//! # Structured Logging
//!
//! Span macros and logging helpers built on the tracing ecosystem.
//!
//! Credential names, types, methods and path templates may be logged.
//! Credential values, generation results and filled paths carrying query
//! values are never logged.

/// Create a tracing span for a call to the credential server.
///
/// Records the HTTP method and the path template, not the filled path.
///
/// ```rust,ignore
/// let span = credhub_span!(request.method(), request.template());
/// let span = credhub_span!("GET", "/api/v1/data/{id}", operation = "get_by_id");
/// ```
#[macro_export]
macro_rules! credhub_span {
    ($method:expr, $template:expr) => {
        tracing::info_span!(
            "credhub_request",
            method = %$method,
            template = %$template,
            request_id = %uuid::Uuid::new_v4(),
            operation = tracing::field::Empty
        )
    };
    ($method:expr, $template:expr, $($field:tt)*) => {
        tracing::info_span!(
            "credhub_request",
            method = %$method,
            template = %$template,
            request_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Log the client configuration.
pub fn log_config_info(config: &crate::config::CredHubConfig) {
    tracing::info!(
        url = %config.url,
        api_path_prefix = %config.api_path_prefix,
        "CredHub client configuration"
    );
}
