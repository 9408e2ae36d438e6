//! Configuration management for the funnel
//!
//! Supports loading configuration from:
//! - YAML files (`config/default.yaml`, `config/{env}.yaml`)
//! - Environment variables (`SETTER_AGENT__` prefix)
//!
//! Alongside the settings themselves:
//! - `catalog.yaml` - products keyed by problem tag
//! - `directives/{key}.txt` - per-state instruction text

pub mod catalog;
pub mod constants;
pub mod directives;
pub mod replies;
pub mod settings;

pub use catalog::CatalogConfig;
pub use directives::FileDirectiveLoader;
pub use replies::ReplyTemplates;
pub use settings::{
    load_settings, load_settings_from, AgentSettings, ObservabilityConfig, PathsConfig,
    RuntimeEnvironment, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for setter_core::SetterError {
    fn from(err: ConfigError) -> Self {
        setter_core::SetterError::Config(err.to_string())
    }
}
