//! Scripted container runtime

use async_trait::async_trait;
use futures::StreamExt;
use futures::channel::mpsc::{UnboundedSender, unbounded};
use gateway_hooks::core::provider::{
    ContainerEvent, ContainerRuntime, ContainerSummary, EventStream, Filters, RuntimeConnector,
};
use gateway_hooks::{GatewayError, Result};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Runtime whose containers and events are driven by the test
pub struct ScriptedRuntime {
    containers: Mutex<Vec<ContainerSummary>>,
    events: Mutex<Option<EventStream>>,
    lists: AtomicUsize,
    closed: AtomicBool,
}

impl ScriptedRuntime {
    pub fn new() -> (Arc<Self>, UnboundedSender<Result<ContainerEvent>>) {
        let (tx, rx) = unbounded();
        let runtime = Arc::new(Self {
            containers: Mutex::new(Vec::new()),
            events: Mutex::new(Some(rx.boxed())),
            lists: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        });
        (runtime, tx)
    }

    /// Start a container carrying `labels`
    pub fn run(&self, id: &str, labels: &[(&str, &str)]) {
        self.containers.lock().push(ContainerSummary {
            id: id.to_string(),
            names: vec![format!("/{}", id)],
            labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        });
    }

    /// Remove a container
    pub fn stop(&self, id: &str) {
        self.containers.lock().retain(|c| c.id != id);
    }

    pub fn lists(&self) -> usize {
        self.lists.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContainerRuntime for ScriptedRuntime {
    async fn list_containers(&self, _filters: &Filters) -> Result<Vec<ContainerSummary>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        Ok(self.containers.lock().clone())
    }

    async fn events(&self, _filters: &Filters) -> Result<EventStream> {
        self.events
            .lock()
            .take()
            .ok_or_else(|| GatewayError::runtime("event stream already taken"))
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Connector handing out one [`ScriptedRuntime`]
pub struct ScriptedConnector(pub Arc<ScriptedRuntime>);

#[async_trait]
impl RuntimeConnector for ScriptedConnector {
    async fn connect(&self, _endpoint: &str) -> Result<Arc<dyn ContainerRuntime>> {
        Ok(self.0.clone())
    }
}
