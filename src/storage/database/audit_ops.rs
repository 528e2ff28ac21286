use crate::audit::AuditLogEntry;
use crate::utils::error::{ConsoleError, Result};
use sea_orm::*;
use tracing::debug;

use super::Database;
use super::entities::{self, audit_log};

impl Database {
    /// Append an audit entry
    pub async fn insert_audit_log(&self, entry: &AuditLogEntry) -> Result<()> {
        debug!("Inserting audit log: {} ({})", entry.action, entry.id);

        let active_model = audit_log::Model::from_entry(entry)?;
        entities::AuditLog::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(ConsoleError::Database)?;

        Ok(())
    }

    /// Most recent audit entries, newest first
    pub async fn recent_audit_logs(&self, limit: u64) -> Result<Vec<AuditLogEntry>> {
        let models = entities::AuditLog::find()
            .order_by_desc(audit_log::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(ConsoleError::Database)?;

        models.iter().map(|m| m.to_entry()).collect()
    }
}
