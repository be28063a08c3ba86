//! Webhook plugin configuration

use super::duration;
use crate::core::webhooks::FormatterConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Options of one webhook destination
///
/// Every field is optional in the file; unset fields are taken from
/// `defaults.webhook`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookOptions {
    /// Upper bound for connecting and sending one request
    #[serde(with = "duration")]
    pub dial_timeout: Duration,
    pub url: String,
    /// Topics this webhook subscribes to
    pub events: Vec<String>,
    /// Gateways whose events are routed to this webhook
    pub gateway_ids: Vec<String>,
    /// Servers whose events are allowed through
    pub server_ids: Vec<String>,
    pub format: FormatterConfig,
}

impl WebhookOptions {
    /// Fill every unset field from `defaults`; set fields win.
    ///
    /// Message maps are merged per event type.
    pub fn merged(&self, defaults: &WebhookOptions) -> WebhookOptions {
        fn pick<T: Clone>(value: &T, fallback: &T, unset: bool) -> T {
            if unset { fallback.clone() } else { value.clone() }
        }

        let mut message_map = self.format.message_map.clone();
        for (event_type, template) in &defaults.format.message_map {
            message_map
                .entry(event_type.clone())
                .or_insert_with(|| template.clone());
        }

        WebhookOptions {
            dial_timeout: pick(
                &self.dial_timeout,
                &defaults.dial_timeout,
                self.dial_timeout.is_zero(),
            ),
            url: pick(&self.url, &defaults.url, self.url.is_empty()),
            events: pick(&self.events, &defaults.events, self.events.is_empty()),
            gateway_ids: pick(
                &self.gateway_ids,
                &defaults.gateway_ids,
                self.gateway_ids.is_empty(),
            ),
            server_ids: pick(
                &self.server_ids,
                &defaults.server_ids,
                self.server_ids.is_empty(),
            ),
            format: FormatterConfig {
                format_type: pick(
                    &self.format.format_type,
                    &defaults.format.format_type,
                    self.format.format_type.is_empty(),
                ),
                message_map,
            },
        }
    }
}

/// `webhook:` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSection {
    pub enable: bool,
    /// Webhook id -> options
    pub webhooks: BTreeMap<String, WebhookOptions>,
}

/// `defaults:` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookDefaults {
    pub webhook: WebhookOptions,
}

/// Configuration consumed by the webhook plugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookPluginConfig {
    pub webhook: WebhookSection,
    pub defaults: WebhookDefaults,
}

impl WebhookPluginConfig {
    /// Every webhook with the defaults merged in, ordered by id
    pub fn resolved_webhooks(&self) -> impl Iterator<Item = (&String, WebhookOptions)> {
        self.webhook
            .webhooks
            .iter()
            .map(|(id, options)| (id, options.merged(&self.defaults.webhook)))
    }
}
