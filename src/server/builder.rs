//! Server builder

use crate::config::Config;
use crate::server::server::ConsoleServer;
use crate::utils::error::{ConsoleError, Result};

/// Server builder for easier configuration
#[derive(Debug, Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<ConsoleServer> {
        let config = self
            .config
            .ok_or_else(|| ConsoleError::config("Configuration is required"))?;

        ConsoleServer::new(&config).await
    }
}
