//! Configuration management for the gateway hooks
//!
//! The proxy hands plugins an untyped configuration tree. [`Config`] keeps
//! that tree as parsed from YAML and exposes typed views of the sections this
//! crate understands.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable naming the default config file
pub const CONFIG_PATH_ENV: &str = "GATEWAY_HOOKS_CONFIG";

/// Loaded configuration file
#[derive(Debug, Clone, Default)]
pub struct Config {
    raw: serde_json::Value,
    /// `providers:` section
    pub providers: ProvidersConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let raw: serde_json::Value = serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;
        let raw = if raw.is_null() {
            serde_json::Value::Object(Default::default())
        } else {
            raw
        };

        let providers = match raw.get("providers") {
            Some(section) => serde_json::from_value(section.clone()).map_err(|e| {
                GatewayError::Config(format!("Failed to parse providers section: {}", e))
            })?,
            None => ProvidersConfig::default(),
        };

        let config = Self { raw, providers };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// The untyped tree, as handed to plugins
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Typed view of the webhook plugin sections
    pub fn webhook_plugin(&self) -> Result<WebhookPluginConfig> {
        WebhookPluginConfig::from_value(&self.raw)
    }

    /// Validate every typed section
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.providers
            .validate()
            .map_err(|e| GatewayError::Config(format!("Provider config error: {}", e)))?;

        let webhook = self.webhook_plugin()?;
        if webhook.webhook.enable {
            webhook
                .validate()
                .map_err(|e| GatewayError::Config(format!("Webhook config error: {}", e)))?;
        }

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.raw)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

impl WebhookPluginConfig {
    /// Decode the plugin sections out of an untyped tree
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| GatewayError::Config(format!("Failed to parse webhook config: {}", e)))
    }
}
