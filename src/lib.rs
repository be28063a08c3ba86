//! # gateway-hooks
//!
//! Event webhooks and a container-label configuration provider for a
//! Minecraft connection proxy.
//!
//! ## Features
//!
//! - **Webhooks**: Project proxy events into a JSON event log and post it to
//!   the webhooks registered for the event's gateway
//! - **Filtering**: Per-webhook topic and server allow lists
//! - **Formatting**: Generic JSON, Discord and Slack message bodies with
//!   `{{placeholder}}` templates
//! - **Docker provider**: Build configuration from container labels and keep
//!   it current by watching lifecycle events
//!
//! ## Plugin Mode
//!
//! ```rust,no_run
//! use gateway_hooks::{Config, WebhookPlugin};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway-hooks.yml").await?;
//!     let plugin = WebhookPlugin::new();
//!     plugin.load(config.raw())?;
//!     // plugin.enable(bus) once the host event bus is up
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use core::events::{Event, EventBus, EventHandler, EventPayload};
pub use core::provider::{DockerProvider, Provider, ProviderData, ProviderType};
pub use core::webhooks::{
    EventData, EventLog, Formatter, Webhook, WebhookError, WebhookPlugin, WebhookRouter,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
