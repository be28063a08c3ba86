//! Payload formatting
//!
//! A webhook posts either the generic JSON projection of the event, or, when
//! its destination is a chat service with a message template for the event
//! type, the rendered message wrapped in that service's envelope.

use super::error::WebhookError;
use super::types::{EventData, EventLog};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

/// Formatting options of one webhook
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatterConfig {
    /// Destination tag: `discord`, `slack`, anything else means generic JSON
    #[serde(rename = "type", default)]
    pub format_type: String,
    /// Event type name -> message template
    #[serde(default)]
    pub message_map: HashMap<String, String>,
}

/// Destination payload style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// Generic JSON of the event data; templates are never applied
    Default,
    /// `{"content": "<message>"}`
    Discord,
    /// `{"text": "<message>"}`
    Slack,
}

impl FormatKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "discord" => FormatKind::Discord,
            "slack" => FormatKind::Slack,
            _ => FormatKind::Default,
        }
    }

    /// Wrap a rendered message, or `None` when this kind has no envelope
    fn envelope(self, message: String) -> Option<serde_json::Value> {
        match self {
            FormatKind::Default => None,
            FormatKind::Discord => Some(json!({ "content": message })),
            FormatKind::Slack => Some(json!({ "text": message })),
        }
    }
}

/// Builds the request body for a webhook
#[derive(Debug, Clone)]
pub struct Formatter {
    config: FormatterConfig,
    kind: FormatKind,
}

impl Formatter {
    pub fn new(config: FormatterConfig) -> Self {
        let kind = FormatKind::from_tag(&config.format_type);
        Self { config, kind }
    }

    pub fn kind(&self) -> FormatKind {
        self.kind
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Serialize the payload for `log`
    pub fn payload(&self, log: &EventLog) -> Result<Vec<u8>, WebhookError> {
        if let Some(template) = self.config.message_map.get(&log.event_type) {
            let message = apply_templates(template, &template_fields(&log.data));
            if let Some(body) = self.kind.envelope(message) {
                return Ok(serde_json::to_vec(&body)?);
            }
        }

        Ok(serde_json::to_vec(&log.data)?)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(FormatterConfig::default())
    }
}

/// Placeholder name -> value for every field a template may reference
pub fn template_fields(data: &EventData) -> Vec<(&'static str, String)> {
    vec![
        ("edition", data.edition.clone()),
        ("gatewayId", data.gateway_id.clone()),
        ("conn.network", data.conn.network.clone()),
        ("conn.localAddress", data.conn.local_addr.clone()),
        ("conn.remoteAddress", data.conn.remote_addr.clone()),
        ("conn.username", data.conn.username.clone()),
        ("server.serverId", data.server.server_id.clone()),
        ("server.serverAddress", data.server.server_addr.clone()),
        ("server.domains", data.server.domains.join(", ")),
        (
            "isLoginRequest",
            data.is_login_request
                .map(|flag| flag.to_string())
                .unwrap_or_default(),
        ),
    ]
}

/// Replace every `{{name}}` in `template` with its value.
///
/// Rendering is a single pass: substituted values are copied verbatim and
/// unknown placeholders are kept as written.
pub fn apply_templates(template: &str, fields: &[(&'static str, String)]) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let value = after.find("}}").and_then(|end| {
            let name = &after[..end];
            fields
                .iter()
                .find(|(field, _)| *field == name)
                .map(|(_, value)| (value, end))
        });

        match value {
            Some((value, end)) => {
                rendered.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                rendered.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    rendered.push_str(rest);
    rendered
}
