//! Core functionality
//!
//! Host events in, webhook deliveries and provider snapshots out.

pub mod events;
pub mod provider;
pub mod webhooks;
