//! Error types for the gateway hooks

use crate::core::webhooks::WebhookError;
use thiserror::Error;

/// Result type alias for the gateway hooks
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway hooks
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Webhook delivery errors
    #[error("Webhook error: {0}")]
    Webhook(#[from] WebhookError),

    /// The plugin was turned off in its configuration
    #[error("Plugin disabled via config: {0}")]
    PluginDisabled(String),

    /// Provider endpoint that no runtime client can serve
    #[error("Unsupported endpoint: {0}")]
    UnsupportedEndpoint(String),

    /// Container runtime errors (listing, event stream)
    #[error("Container runtime error: {0}")]
    Runtime(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
