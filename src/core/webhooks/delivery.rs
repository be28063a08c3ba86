//! Single destination delivery

use super::client::{HttpClient, WebhookRequest};
use super::error::WebhookError;
use super::formatter::Formatter;
use super::types::EventLog;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A webhook destination with its filters and formatter
#[derive(Clone)]
pub struct Webhook {
    pub id: String,
    pub url: String,
    pub allowed_topics: Vec<String>,
    pub allowed_servers: Vec<String>,
    pub formatter: Formatter,
    /// Bound on one delivery; zero means none
    pub dial_timeout: Duration,
    client: Arc<dyn HttpClient>,
}

impl Webhook {
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        client: Arc<dyn HttpClient>,
        formatter: Formatter,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            allowed_topics: Vec::new(),
            allowed_servers: Vec::new(),
            formatter,
            dial_timeout: Duration::ZERO,
            client,
        }
    }

    pub fn with_allowed_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dial_timeout(mut self, dial_timeout: Duration) -> Self {
        self.dial_timeout = dial_timeout;
        self
    }

    pub fn with_allowed_servers<I, S>(mut self, servers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_servers = servers.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this webhook subscribes to `log`.
    ///
    /// The event's server must be allowed and one of its topics must be
    /// allowed. An empty server list allows nothing.
    pub fn allows(&self, log: &EventLog) -> bool {
        let server_id = &log.data.server.server_id;
        if !self.allowed_servers.iter().any(|s| s == server_id) {
            return false;
        }

        self.allowed_topics
            .iter()
            .any(|allowed| log.topics.iter().any(|topic| topic == allowed))
    }

    /// POST the formatted event to this webhook.
    ///
    /// The response status is not inspected; only failing to send is an error.
    pub async fn dispatch_event(&self, log: &EventLog) -> Result<(), WebhookError> {
        if !self.allows(log) {
            return Err(WebhookError::EventTypeNotAllowed);
        }

        let body = self.formatter.payload(log)?;
        let status = self.client.post(WebhookRequest::json(&self.url, body)).await?;

        debug!(
            webhook_id = %self.id,
            event_type = %log.event_type,
            status,
            "webhook event sent"
        );
        Ok(())
    }
}

impl fmt::Debug for Webhook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Webhook")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("allowed_topics", &self.allowed_topics)
            .field("allowed_servers", &self.allowed_servers)
            .field("formatter", &self.formatter)
            .field("dial_timeout", &self.dial_timeout)
            .finish_non_exhaustive()
    }
}
