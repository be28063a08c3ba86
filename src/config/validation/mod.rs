//! Configuration validation
//!
//! - `trait_def`: The Validate trait
//! - `webhook_validators`: Webhook plugin validators
//! - `provider_validators`: Container provider validators

mod provider_validators;
mod trait_def;
mod webhook_validators;

pub use trait_def::Validate;
