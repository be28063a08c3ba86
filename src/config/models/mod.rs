//! Configuration data models

pub mod duration;
pub mod provider;
pub mod webhook;

pub use provider::*;
pub use webhook::*;
