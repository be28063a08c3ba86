//! Docker label provider

use super::labels;
use super::runtime::{ContainerRuntime, Filters, RuntimeConnector};
use super::types::{ConfigTree, ProviderData, ProviderType};
use super::Provider;
use crate::config::models::{DOCKER_SOCKET_ENDPOINT, DockerConfig};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Lifecycle of a [`DockerProvider`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderState {
    Idle,
    Listing,
    Watching,
    Closed,
}

/// Handle to a running watch loop
#[derive(Debug)]
pub struct WatchTask {
    handle: JoinHandle<Result<()>>,
}

impl WatchTask {
    /// Wait for the loop to end and return its terminal result
    pub async fn join(self) -> Result<()> {
        self.handle
            .await
            .map_err(|e| GatewayError::internal(format!("watch task failed: {}", e)))?
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Reads labeled containers into configuration snapshots
#[derive(Clone)]
struct LabelReader {
    client: Arc<dyn ContainerRuntime>,
    config: DockerConfig,
}

impl LabelReader {
    async fn read_config_data(&self) -> Result<ProviderData> {
        let filters = Filters::new().with("network", self.config.network.clone());
        let listing = self.client.list_containers(&filters);

        let containers = if self.config.client_timeout.is_zero() {
            listing.await?
        } else {
            tokio::time::timeout(self.config.client_timeout, listing)
                .await
                .map_err(|_| {
                    GatewayError::timeout(format!(
                        "listing containers took longer than {:?}",
                        self.config.client_timeout
                    ))
                })??
        };

        let mut tree = ConfigTree::new();
        for container in &containers {
            labels::apply_labels(&mut tree, &self.config.label_prefix, &container.labels);
        }

        debug!(
            containers = containers.len(),
            keys = tree.len(),
            "read docker label configuration"
        );
        Ok(ProviderData::new(ProviderType::Docker, tree))
    }

    /// Re-read labels on every relevant container event until cancelled or
    /// the event stream ends.
    async fn watch(
        self,
        data_tx: mpsc::Sender<ProviderData>,
        cancel: CancellationToken,
    ) -> Result<()> {
        let filters = Filters::new().with("type", "container");
        let mut events = self.client.events(&filters).await?;

        loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                next = events.next() => next,
            };

            let event = match next {
                Some(Ok(event)) => event,
                Some(Err(err)) => return Err(err),
                None => {
                    debug!("docker event stream closed");
                    return Ok(());
                }
            };

            if !event.changes_labels() {
                continue;
            }

            let data = match self.read_config_data().await {
                Ok(data) => data,
                Err(err) => {
                    info!(error = %err, "failed to read data");
                    continue;
                }
            };

            tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                sent = data_tx.send(data) => {
                    if sent.is_err() {
                        debug!("provider data receiver dropped");
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Builds configuration from the labels of containers on one network
pub struct DockerProvider {
    config: DockerConfig,
    connector: Arc<dyn RuntimeConnector>,
    client: Option<Arc<dyn ContainerRuntime>>,
    state: ProviderState,
    cancel: CancellationToken,
    watch_task: Option<WatchTask>,
}

impl DockerProvider {
    pub fn new(config: DockerConfig, connector: Arc<dyn RuntimeConnector>) -> Self {
        Self {
            config,
            connector,
            client: None,
            state: ProviderState::Idle,
            cancel: CancellationToken::new(),
            watch_task: None,
        }
    }

    pub fn state(&self) -> ProviderState {
        self.state
    }

    pub fn config(&self) -> &DockerConfig {
        &self.config
    }

    /// Take ownership of the watch loop handle, e.g. to observe its error.
    ///
    /// [`close`](Provider::close) still stops a taken loop.
    pub fn take_watch_task(&mut self) -> Option<WatchTask> {
        self.watch_task.take()
    }

    /// Read a fresh snapshot with the connected client
    pub async fn list(&self) -> Result<ProviderData> {
        let client = self
            .client
            .clone()
            .ok_or_else(|| GatewayError::internal("docker provider is not connected"))?;

        LabelReader {
            client,
            config: self.config.clone(),
        }
        .read_config_data()
        .await
    }
}

#[async_trait]
impl Provider for DockerProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Docker
    }

    async fn provide(&mut self, data_tx: mpsc::Sender<ProviderData>) -> Result<ProviderData> {
        if !self.config.is_enabled() {
            return Ok(ProviderData::empty(ProviderType::Docker));
        }

        if self.config.endpoint != DOCKER_SOCKET_ENDPOINT {
            return Err(GatewayError::UnsupportedEndpoint(self.config.endpoint.clone()));
        }

        if self.state != ProviderState::Idle {
            return Err(GatewayError::internal(format!(
                "docker provider cannot start from state {:?}",
                self.state
            )));
        }

        let client = self.connector.connect(&self.config.endpoint).await?;
        let reader = LabelReader {
            client: Arc::clone(&client),
            config: self.config.clone(),
        };

        // Nothing is committed until the first listing succeeds
        let data = match reader.read_config_data().await {
            Ok(data) => data,
            Err(err) => {
                if let Err(close_err) = client.close().await {
                    warn!(error = %close_err, "failed to close docker client");
                }
                return Err(err);
            }
        };
        self.client = Some(client);
        self.state = ProviderState::Listing;

        if self.config.watch {
            let cancel = self.cancel.child_token();
            let provider = self.provider_type();
            let handle = tokio::spawn(async move {
                let result = reader.watch(data_tx, cancel).await;
                if let Err(err) = &result {
                    error!(error = %err, provider = %provider, "failed while watching provider");
                }
                result
            });
            self.watch_task = Some(WatchTask { handle });
            self.state = ProviderState::Watching;
            info!(network = %self.config.network, "watching docker containers");
        }

        Ok(data)
    }

    async fn close(&mut self) -> Result<()> {
        if self.state == ProviderState::Closed {
            return Ok(());
        }

        self.cancel.cancel();
        if let Some(task) = self.watch_task.take() {
            if let Err(err) = task.join().await {
                warn!(error = %err, "docker watch ended with error");
            }
        }

        self.state = ProviderState::Closed;
        if let Some(client) = self.client.take() {
            client.close().await?;
        }
        Ok(())
    }
}
