//! Container runtime seam
//!
//! The provider needs two things from a runtime: list containers with their
//! labels, and a stream of container lifecycle events. The host supplies the
//! client through a [`RuntimeConnector`].

use crate::utils::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A container as returned by a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
    pub labels: BTreeMap<String, String>,
}

/// A runtime lifecycle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerEvent {
    /// Object type, `container` for the events the provider subscribes to
    pub kind: String,
    /// e.g. `start`, `die`, `health_status: healthy`
    pub action: String,
    pub actor_id: String,
}

impl ContainerEvent {
    pub fn container(action: impl Into<String>, actor_id: impl Into<String>) -> Self {
        Self {
            kind: "container".to_string(),
            action: action.into(),
            actor_id: actor_id.into(),
        }
    }

    /// Whether the event can change the labels visible to a listing
    pub fn changes_labels(&self) -> bool {
        matches!(self.action.as_str(), "start" | "die") || self.action.starts_with("health_status")
    }
}

/// Key/value filters understood by the runtime API
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(BTreeMap<String, Vec<String>>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.entry(key.into()).or_default().push(value.into());
        self
    }

    pub fn get(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Live runtime events; the stream ends when the runtime closes it.
///
/// Dropping the stream ends the subscription.
pub type EventStream = BoxStream<'static, Result<ContainerEvent>>;

/// A connected container runtime client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    async fn list_containers(&self, filters: &Filters) -> Result<Vec<ContainerSummary>>;

    async fn events(&self, filters: &Filters) -> Result<EventStream>;

    /// Release the client; further calls may fail
    async fn close(&self) -> Result<()>;
}

/// Opens runtime clients
#[async_trait]
pub trait RuntimeConnector: Send + Sync {
    async fn connect(&self, endpoint: &str) -> Result<Arc<dyn ContainerRuntime>>;
}
