//! Webhook configuration validators

use super::trait_def::Validate;
use crate::config::models::{WebhookOptions, WebhookPluginConfig};
use tracing::{debug, warn};

impl Validate for WebhookOptions {
    fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("url cannot be empty".to_string());
        }

        if self.gateway_ids.is_empty() {
            warn!(url = %self.url, "webhook has no gatewayIds and will never receive events");
        }

        Ok(())
    }
}

impl Validate for WebhookPluginConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating webhook plugin configuration");

        for (id, options) in self.resolved_webhooks() {
            if id.trim().is_empty() {
                return Err("webhook id cannot be empty".to_string());
            }
            options
                .validate()
                .map_err(|e| format!("webhook '{}': {}", id, e))?;
        }

        Ok(())
    }
}
