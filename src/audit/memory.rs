//! In-memory audit writer

use super::types::{AuditLogEntry, NewAuditEntry};
use super::writer::AuditWriter;
use crate::utils::error::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Keeps entries in process memory, oldest first
#[derive(Debug, Default)]
pub struct MemoryAuditWriter {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl MemoryAuditWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl AuditWriter for MemoryAuditWriter {
    async fn write(&self, entry: NewAuditEntry) -> Result<AuditLogEntry> {
        let written = AuditLogEntry::from_new(entry);
        self.entries.write().push(written.clone());
        Ok(written)
    }

    async fn recent(&self, limit: u64) -> Result<Vec<AuditLogEntry>> {
        let entries = self.entries.read();
        Ok(entries.iter().rev().take(limit as usize).cloned().collect())
    }
}
