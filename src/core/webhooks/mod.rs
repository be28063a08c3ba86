//! Webhook dispatch
//!
//! Host events are projected into an [`EventLog`], routed by gateway id and
//! posted to every webhook whose topic and server filters accept them.
//! Delivery is best effort: no retries, failures are reported to the caller.

mod adapter;
mod client;
mod delivery;
mod error;
mod formatter;
mod plugin;
mod router;
mod types;

pub use adapter::event_data;
pub use client::{HttpClient, ReqwestHttpClient, WebhookRequest};
pub use delivery::Webhook;
pub use error::WebhookError;
pub use formatter::{FormatKind, Formatter, FormatterConfig, apply_templates, template_fields};
pub use plugin::{WebhookEventHandler, WebhookPlugin};
pub use router::{
    ClientFactory, DispatchFailure, RouteTable, WebhookRouter, build_routes,
    reqwest_client_factory,
};
pub use types::{ClientData, EventData, EventLog, ServerData};

#[cfg(test)]
pub(crate) use client::MockHttpClient;
