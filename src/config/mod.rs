//! Configuration management for the console
//!
//! This module handles loading, validation, and environment overrides.

pub mod models;

pub use models::*;

use crate::utils::error::{ConsoleError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the console
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Console configuration
    pub console: ConsoleConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConsoleError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from defaults plus environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document without validating it
    pub fn from_yaml(content: &str) -> Result<Self> {
        let console: ConsoleConfig = serde_yaml::from_str(content)
            .map_err(|e| ConsoleError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self { console })
    }

    /// Apply `CONSOLE_*`, `DATABASE_URL` and `JWT_SECRET` overrides
    ///
    /// `lookup` abstracts the environment so callers can supply their own source.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CONSOLE_HOST") {
            self.console.server.host = host;
        }
        if let Some(port) = lookup("CONSOLE_PORT") {
            self.console.server.port = port
                .parse()
                .map_err(|e| ConsoleError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.console.storage.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.console.auth.jwt_secret = secret;
        }
        if let Some(level) = lookup("CONSOLE_LOG") {
            self.console.logging.level = level;
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.console.server
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.console.auth
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.console.storage
    }

    /// Get audit configuration
    pub fn audit(&self) -> &AuditConfig {
        &self.console.audit
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.console.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.console
            .server
            .validate()
            .map_err(|e| ConsoleError::Config(format!("Server config error: {}", e)))?;

        self.console
            .auth
            .validate()
            .map_err(|e| ConsoleError::Config(format!("Auth config error: {}", e)))?;

        self.console
            .storage
            .database
            .validate()
            .map_err(|e| ConsoleError::Config(format!("Database config error: {}", e)))?;

        crate::config::models::auth::warn_insecure_config(&self.console.auth);

        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.console)
            .map_err(|e| ConsoleError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
