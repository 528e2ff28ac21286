//! Audit writers
//!
//! Writers persist entries. [`AuditLogger`] is what mutation code paths call:
//! it validates, writes, and swallows any failure so the mutation itself is
//! never affected.

use super::types::{AuditLogEntry, NewAuditEntry};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Append-only sink for audit entries
#[async_trait]
pub trait AuditWriter: Send + Sync {
    async fn write(&self, entry: NewAuditEntry) -> Result<AuditLogEntry>;

    /// Most recent entries, newest first
    ///
    /// Writers that keep no readable history return an empty list.
    async fn recent(&self, _limit: u64) -> Result<Vec<AuditLogEntry>> {
        Ok(Vec::new())
    }
}

/// Best-effort front end for an [`AuditWriter`]
#[derive(Clone)]
pub struct AuditLogger {
    writer: Option<Arc<dyn AuditWriter>>,
}

impl std::fmt::Debug for AuditLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLogger")
            .field("enabled", &self.writer.is_some())
            .finish()
    }
}

impl AuditLogger {
    pub fn new(writer: Arc<dyn AuditWriter>) -> Self {
        Self {
            writer: Some(writer),
        }
    }

    /// Logger that records nothing
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Record an entry; failures are logged and dropped
    pub async fn record(&self, entry: NewAuditEntry) -> Option<AuditLogEntry> {
        let writer = self.writer.as_ref()?;

        if let Err(e) = entry.validate() {
            warn!(action = %entry.action, "Dropping invalid audit entry: {}", e);
            return None;
        }

        let action = entry.action.clone();
        match writer.write(entry).await {
            Ok(written) => {
                debug!(id = %written.id, %action, "Audit entry recorded");
                Some(written)
            }
            Err(e) => {
                warn!(%action, "Failed to record audit entry: {}", e);
                None
            }
        }
    }

    /// Most recent entries, newest first; empty when disabled
    pub async fn recent(&self, limit: u64) -> Result<Vec<AuditLogEntry>> {
        match &self.writer {
            Some(writer) => writer.recent(limit).await,
            None => Ok(Vec::new()),
        }
    }
}
