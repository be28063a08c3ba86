//! Gateway to webhook routing
//!
//! The route table is immutable once built. Reloads build a fresh table and
//! swap it in, so a dispatch in flight keeps the table it started with.

use super::client::{HttpClient, ReqwestHttpClient};
use super::delivery::Webhook;
use super::error::WebhookError;
use super::formatter::Formatter;
use super::types::{EventData, EventLog};
use crate::config::models::{WebhookOptions, WebhookPluginConfig};
use crate::config::validation::Validate;
use crate::utils::error::{GatewayError, Result};
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Gateway id -> webhooks in registration order
pub type RouteTable = HashMap<String, Vec<Arc<Webhook>>>;

/// A webhook that failed to receive an event
#[derive(Debug)]
pub struct DispatchFailure {
    pub webhook_id: String,
    pub error: WebhookError,
}

/// Creates the HTTP client of a webhook from its options
pub type ClientFactory =
    Arc<dyn Fn(&WebhookOptions) -> std::result::Result<Arc<dyn HttpClient>, WebhookError> + Send + Sync>;

/// Default factory: one `reqwest` client per webhook, bounded by `dialTimeout`
pub fn reqwest_client_factory() -> ClientFactory {
    Arc::new(
        |options: &WebhookOptions| -> std::result::Result<Arc<dyn HttpClient>, WebhookError> {
            let client = ReqwestHttpClient::with_timeout(options.dial_timeout)?;
            Ok(Arc::new(client))
        },
    )
}

/// Build a route table from plugin configuration.
///
/// Webhooks are registered in id order; a webhook listed under several
/// gateways is shared between them.
pub fn build_routes(config: &WebhookPluginConfig, factory: &ClientFactory) -> Result<RouteTable> {
    let mut routes = RouteTable::new();

    for (id, options) in config.resolved_webhooks() {
        options
            .validate()
            .map_err(|e| GatewayError::config(format!("webhook '{}': {}", id, e)))?;

        let client = factory(&options).map_err(|e| {
            GatewayError::config(format!("webhook '{}': failed to create HTTP client: {}", id, e))
        })?;

        let webhook = Arc::new(
            Webhook::new(id.clone(), options.url.clone(), client, Formatter::new(options.format.clone()))
                .with_allowed_topics(options.events.iter().cloned())
                .with_allowed_servers(options.server_ids.iter().cloned())
                .with_dial_timeout(options.dial_timeout),
        );

        for gateway_id in &options.gateway_ids {
            routes
                .entry(gateway_id.clone())
                .or_default()
                .push(Arc::clone(&webhook));
        }
    }

    Ok(routes)
}

/// Routes events to the webhooks registered for their gateway
pub struct WebhookRouter {
    routes: ArcSwap<RouteTable>,
}

impl WebhookRouter {
    pub fn new() -> Self {
        Self::with_routes(RouteTable::new())
    }

    pub fn with_routes(routes: RouteTable) -> Self {
        Self {
            routes: ArcSwap::from_pointee(routes),
        }
    }

    /// Replace the whole route table
    pub fn replace(&self, routes: RouteTable) {
        let gateways = routes.len();
        self.routes.store(Arc::new(routes));
        info!(gateways, "webhook routes replaced");
    }

    /// The current route table
    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.routes.load_full()
    }

    /// Webhooks registered for `gateway_id`
    pub fn webhooks_for(&self, gateway_id: &str) -> Vec<Arc<Webhook>> {
        self.routes
            .load()
            .get(gateway_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Deliver an event to every webhook of its gateway.
    ///
    /// Webhooks are tried one after another; a failing webhook does not stop
    /// the rest. Filtered-out webhooks are not reported.
    pub async fn dispatch(
        &self,
        event_type: &str,
        topics: Vec<String>,
        occurred_at: DateTime<Utc>,
        data: EventData,
    ) -> Vec<DispatchFailure> {
        let routes = self.snapshot();
        let Some(webhooks) = routes.get(&data.gateway_id) else {
            debug!(gateway_id = %data.gateway_id, "no webhooks registered for gateway");
            return Vec::new();
        };

        let log = EventLog::new(event_type, topics, occurred_at, data);
        self.dispatch_log(webhooks, &log).await
    }

    async fn dispatch_log(&self, webhooks: &[Arc<Webhook>], log: &EventLog) -> Vec<DispatchFailure> {
        let mut failures = Vec::new();
        for webhook in webhooks {
            match webhook.dispatch_event(log).await {
                Ok(()) => {}
                Err(error) if error.is_filtered() => {}
                Err(error) => failures.push(DispatchFailure {
                    webhook_id: webhook.id.clone(),
                    error,
                }),
            }
        }
        failures
    }
}

impl Default for WebhookRouter {
    fn default() -> Self {
        Self::new()
    }
}
