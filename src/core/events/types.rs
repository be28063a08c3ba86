//! Event type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use uuid::Uuid;

/// Client edition a connection speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    Java,
    Bedrock,
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edition::Java => f.write_str("java"),
            Edition::Bedrock => f.write_str("bedrock"),
        }
    }
}

/// An accepted client connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conn {
    pub edition: Edition,
    /// Gateway the connection was accepted on
    pub gateway_id: String,
    /// Transport network, e.g. `tcp` or `udp`
    pub network: String,
    pub local_addr: SocketAddr,
    pub remote_addr: SocketAddr,
}

/// A connection that finished the handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub conn: Conn,
    pub username: String,
    /// Server address the client asked for
    pub matched_addr: String,
    pub is_login_request: bool,
}

/// Upstream server a player is routed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub id: String,
    pub domains: Vec<String>,
}

/// Payload of a host event
///
/// New variants may be added by the host at any time; consumers must keep a
/// catch-all arm.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum EventPayload {
    AcceptedConn { conn: Conn },
    PreConnProcessing { conn: Conn },
    PostConnProcessing { player: Player },
    PrePlayerJoin { player: Player, server: Server },
    PlayerJoin { player: Player, server: Server },
    PlayerLeave { player: Player, server: Server },
    /// Host specific events this crate has no projection for
    Custom {
        name: String,
        payload: serde_json::Value,
    },
}

/// An occurrence published on the host bus
#[derive(Debug, Clone)]
pub struct Event {
    pub id: Uuid,
    pub topics: Vec<String>,
    pub occurred_at: DateTime<Utc>,
    pub data: EventPayload,
}

impl Event {
    /// Create an event stamped with the current time
    pub fn new<I, S>(topics: I, data: EventPayload) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Uuid::new_v4(),
            topics: topics.into_iter().map(Into::into).collect(),
            occurred_at: Utc::now(),
            data,
        }
    }

    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}
