//! Configuration provider settings

use super::duration;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The only runtime endpoint a provider can connect to
pub const DOCKER_SOCKET_ENDPOINT: &str = "unix:///var/run/docker.sock";

/// Default timeout of one container listing
pub fn default_client_timeout() -> Duration {
    Duration::from_secs(5)
}

/// Docker label provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DockerConfig {
    /// Timeout applied to each container listing
    #[serde(with = "duration")]
    pub client_timeout: Duration,
    /// Only labels starting with this prefix are read
    pub label_prefix: String,
    /// Runtime endpoint; empty disables the provider
    pub endpoint: String,
    /// Only containers attached to this network are read
    pub network: String,
    /// Re-read labels on container lifecycle events
    pub watch: bool,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            client_timeout: default_client_timeout(),
            label_prefix: String::new(),
            endpoint: String::new(),
            network: String::new(),
            watch: false,
        }
    }
}

impl DockerConfig {
    pub fn is_enabled(&self) -> bool {
        !self.endpoint.is_empty()
    }
}

/// `providers:` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub docker: DockerConfig,
}
