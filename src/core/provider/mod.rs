//! Dynamic configuration providers
//!
//! A provider reads configuration from an external source, returns the first
//! snapshot from [`Provider::provide`] and, when watching, pushes every later
//! snapshot onto the channel it was given. Snapshots always replace the
//! previous one wholesale.

mod docker;
pub mod labels;
mod runtime;
mod types;

pub use docker::{DockerProvider, ProviderState, WatchTask};
pub use runtime::{
    ContainerEvent, ContainerRuntime, ContainerSummary, EventStream, Filters, RuntimeConnector,
};
#[cfg(test)]
pub(crate) use runtime::MockContainerRuntime;
pub use types::{ConfigTree, ConfigValue, ProviderData, ProviderType};

use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A source of configuration snapshots
#[async_trait]
pub trait Provider: Send {
    fn provider_type(&self) -> ProviderType;

    /// Read the initial snapshot and, if configured, start watching.
    ///
    /// Later snapshots are sent on `data_tx`; the receiver must be drained.
    async fn provide(&mut self, data_tx: mpsc::Sender<ProviderData>) -> Result<ProviderData>;

    /// Stop watching and release the client. Safe to call more than once.
    async fn close(&mut self) -> Result<()>;
}
