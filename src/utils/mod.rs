//! Utility modules for the gateway hooks
//!
//! - **error**: Crate-wide error type and helpers
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{GatewayError, Result};
pub use logging::init_logging;
