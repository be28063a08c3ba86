//! Webhook delivery errors

use thiserror::Error;

/// Outcome of a failed [`Webhook::dispatch_event`](super::Webhook::dispatch_event)
#[derive(Error, Debug)]
pub enum WebhookError {
    /// The webhook does not subscribe to this event. Expected, not a fault.
    #[error("event topic not allowed")]
    EventTypeNotAllowed,

    /// The request could not be built or sent
    #[error("transport error: {0}")]
    Transport(String),

    /// The request exceeded the webhook's timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The payload could not be serialized
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WebhookError {
    /// True when the event was filtered out rather than failed
    pub fn is_filtered(&self) -> bool {
        matches!(self, Self::EventTypeNotAllowed)
    }
}

impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
