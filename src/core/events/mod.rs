//! Host event model
//!
//! The proxy publishes [`Event`]s on its own bus. This crate only consumes
//! them: it attaches an [`EventHandler`] through the [`EventBus`] seam and
//! never owns the bus lifecycle.

mod bus;
mod types;

pub use bus::{EventBus, EventHandler, SubscriptionId};
pub use types::{Conn, Edition, Event, EventPayload, Player, Server};
