//! Common test utilities for gateway-hooks

pub mod fixtures;
pub mod runtime;

pub use fixtures::{EventFactory, MemoryBus, webhook_config};
pub use runtime::{ScriptedConnector, ScriptedRuntime};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
