//! Top-level console configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Console configuration as read from YAML
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConsoleConfig {
    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,
    /// Sessions and redirects
    #[serde(default)]
    pub auth: AuthConfig,
    /// Database
    #[serde(default)]
    pub storage: StorageConfig,
    /// Audit log
    #[serde(default)]
    pub audit: AuditConfig,
    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}
