//! # Configuration Management
//!
//! Client configuration, loaded from TOML and validated before use.

pub mod settings;

pub use settings::CredHubConfig;
