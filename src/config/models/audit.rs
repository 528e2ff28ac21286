//! Audit log configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Where audit entries are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditBackend {
    /// `audit_logs` table in the configured database
    #[default]
    Database,
    /// Process-local buffer, lost on restart
    Memory,
}

/// Audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Record audit entries at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Storage backend
    #[serde(default)]
    pub backend: AuditBackend,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: AuditBackend::default(),
        }
    }
}
