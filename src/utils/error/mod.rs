//! Error handling for the gateway hooks
//!
//! This module defines the error type shared by the webhook engine, the
//! configuration layer and the container providers.

mod helpers;
mod types;

pub use types::{GatewayError, Result};
