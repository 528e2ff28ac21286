//! Database-backed audit writer

use super::types::{AuditLogEntry, NewAuditEntry};
use super::writer::AuditWriter;
use crate::storage::Database;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Writes entries to the `audit_logs` table
#[derive(Debug, Clone)]
pub struct DatabaseAuditWriter {
    db: Arc<Database>,
}

impl DatabaseAuditWriter {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditWriter for DatabaseAuditWriter {
    async fn write(&self, entry: NewAuditEntry) -> Result<AuditLogEntry> {
        let entry = AuditLogEntry::from_new(entry);
        self.db.insert_audit_log(&entry).await?;
        Ok(entry)
    }

    async fn recent(&self, limit: u64) -> Result<Vec<AuditLogEntry>> {
        self.db.recent_audit_logs(limit).await
    }
}
