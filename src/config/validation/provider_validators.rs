//! Provider configuration validators

use super::trait_def::Validate;
use crate::config::models::{DOCKER_SOCKET_ENDPOINT, DockerConfig, ProvidersConfig};

impl Validate for DockerConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.is_enabled() {
            return Ok(());
        }

        if self.endpoint != DOCKER_SOCKET_ENDPOINT {
            return Err(format!(
                "unsupported docker endpoint '{}', expected '{}'",
                self.endpoint, DOCKER_SOCKET_ENDPOINT
            ));
        }

        if self.network.trim().is_empty() {
            return Err("docker network cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for ProvidersConfig {
    fn validate(&self) -> Result<(), String> {
        self.docker
            .validate()
            .map_err(|e| format!("docker provider: {}", e))
    }
}
