//! Event bus seam

use super::types::Event;
use async_trait::async_trait;
use uuid::Uuid;

/// Handle returned by [`EventBus::attach`]
pub type SubscriptionId = Uuid;

/// Receives events from the host bus
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: Event);
}

/// The host's event bus
///
/// Implemented by the host application. Handlers may be invoked concurrently.
pub trait EventBus: Send + Sync {
    /// Register a handler for all published events
    fn attach(&self, handler: std::sync::Arc<dyn EventHandler>) -> SubscriptionId;

    /// Remove a handler; returns false when the id was unknown
    fn detach(&self, id: SubscriptionId) -> bool;
}
