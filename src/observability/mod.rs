//! # Observability
//!
//! Span and logging helpers. Subscribers are installed by the embedding
//! application; this crate only emits `tracing` events and spans.

pub mod logging;

pub use logging::log_config_info;
