//! Webhook type definitions
//!
//! The JSON shape of these types is the default payload posted to a webhook,
//! so field names are part of the wire contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Connection details of an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientData {
    pub network: String,
    #[serde(rename = "localAddress")]
    pub local_addr: String,
    #[serde(rename = "remoteAddress")]
    pub remote_addr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
}

/// Target server details of an event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerData {
    #[serde(rename = "serverId", default, skip_serializing_if = "String::is_empty")]
    pub server_id: String,
    #[serde(rename = "serverAddress", default, skip_serializing_if = "String::is_empty")]
    pub server_addr: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,
}

/// Flattened projection of a host event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    pub edition: String,
    pub gateway_id: String,
    #[serde(rename = "client")]
    pub conn: ClientData,
    pub server: ServerData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_login_request: Option<bool>,
}

/// Envelope handed to every webhook of a gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLog {
    #[serde(rename = "type")]
    pub event_type: String,
    pub topics: Vec<String>,
    pub occurred_at: DateTime<Utc>,
    pub data: EventData,
}

impl EventLog {
    pub fn new(
        event_type: impl Into<String>,
        topics: Vec<String>,
        occurred_at: DateTime<Utc>,
        data: EventData,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            topics,
            occurred_at,
            data,
        }
    }
}
