//! Webhook plugin
//!
//! Glue between the host: configuration load/reload, attaching to the event
//! bus, and turning bus events into router dispatches.

use super::adapter;
use super::router::{ClientFactory, WebhookRouter, build_routes, reqwest_client_factory};
use crate::config::models::WebhookPluginConfig;
use crate::core::events::{Event, EventBus, EventHandler, SubscriptionId};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Forwards bus events to the router
pub struct WebhookEventHandler {
    router: Arc<WebhookRouter>,
}

impl WebhookEventHandler {
    pub fn new(router: Arc<WebhookRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl EventHandler for WebhookEventHandler {
    async fn handle(&self, event: Event) {
        let Some((event_type, data)) = adapter::event_data(&event.data) else {
            return;
        };

        let failures = self
            .router
            .dispatch(event_type, event.topics, event.occurred_at, data)
            .await;

        for failure in failures {
            error!(
                webhook_id = %failure.webhook_id,
                error = %failure.error,
                "dispatching webhook event"
            );
        }
    }
}

/// The webhook plugin
pub struct WebhookPlugin {
    config: RwLock<WebhookPluginConfig>,
    router: Arc<WebhookRouter>,
    client_factory: ClientFactory,
    subscription: Mutex<Option<(Arc<dyn EventBus>, SubscriptionId)>>,
}

impl WebhookPlugin {
    pub fn new() -> Self {
        Self::with_client_factory(reqwest_client_factory())
    }

    /// Use `factory` to create each webhook's HTTP client
    pub fn with_client_factory(factory: ClientFactory) -> Self {
        Self {
            config: RwLock::new(WebhookPluginConfig::default()),
            router: Arc::new(WebhookRouter::new()),
            client_factory: factory,
            subscription: Mutex::new(None),
        }
    }

    pub fn name(&self) -> &'static str {
        "Webhook"
    }

    pub fn version(&self) -> &'static str {
        "internal"
    }

    /// Build routes from the untyped plugin configuration and activate them.
    ///
    /// On any error the previously active routes stay in place.
    pub fn load(&self, cfg: &serde_json::Value) -> Result<()> {
        let config = WebhookPluginConfig::from_value(cfg)?;
        if !config.webhook.enable {
            return Err(GatewayError::PluginDisabled(self.name().to_string()));
        }

        let routes = build_routes(&config, &self.client_factory)?;
        *self.config.write() = config;
        self.router.replace(routes);
        Ok(())
    }

    pub fn reload(&self, cfg: &serde_json::Value) -> Result<()> {
        self.load(cfg)
    }

    /// Start receiving events from `bus`
    pub fn enable(&self, bus: Arc<dyn EventBus>) -> Result<()> {
        let mut subscription = self.subscription.lock();
        if let Some((previous_bus, id)) = subscription.take() {
            previous_bus.detach(id);
        }

        let handler = Arc::new(WebhookEventHandler::new(Arc::clone(&self.router)));
        let id = bus.attach(handler);
        *subscription = Some((bus, id));

        info!(plugin = self.name(), subscription = %id, "plugin enabled");
        Ok(())
    }

    /// Stop receiving events; a no-op when not enabled
    pub fn disable(&self) -> Result<()> {
        if let Some((bus, id)) = self.subscription.lock().take() {
            if !bus.detach(id) {
                debug!(subscription = %id, "event bus did not know the subscription");
            }
            info!(plugin = self.name(), "plugin disabled");
        }
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// The active configuration
    pub fn config(&self) -> WebhookPluginConfig {
        self.config.read().clone()
    }

    pub fn router(&self) -> &Arc<WebhookRouter> {
        &self.router
    }
}

impl Default for WebhookPlugin {
    fn default() -> Self {
        Self::new()
    }
}
