use crate::audit::{AuditCategory, AuditChanges, AuditLogEntry};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Audit log database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// User who performed the action
    pub actor_id: Uuid,

    pub action: String,

    pub category: String,

    pub resource_type: Option<String>,

    pub resource_id: Option<String>,

    /// `{before, after}` serialized as JSON text
    #[sea_orm(column_type = "Text", nullable)]
    pub changes: Option<String>,

    /// Free-form metadata serialized as JSON text
    #[sea_orm(column_type = "Text", nullable)]
    pub metadata: Option<String>,

    pub ip_address: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub user_agent: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to a domain audit entry
    pub fn to_entry(&self) -> crate::utils::error::Result<AuditLogEntry> {
        let changes = self
            .changes
            .as_deref()
            .map(serde_json::from_str::<AuditChanges>)
            .transpose()?;
        let metadata = self
            .metadata
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()?;

        Ok(AuditLogEntry {
            id: self.id,
            actor_id: self.actor_id,
            action: self.action.clone(),
            category: AuditCategory::from_str(&self.category)?,
            resource_type: self.resource_type.clone(),
            resource_id: self.resource_id.clone(),
            changes,
            metadata,
            ip_address: self.ip_address.clone(),
            user_agent: self.user_agent.clone(),
            created_at: self.created_at.naive_utc().and_utc(),
        })
    }

    /// Convert a domain audit entry to an active model
    pub fn from_entry(entry: &AuditLogEntry) -> crate::utils::error::Result<ActiveModel> {
        let changes = entry.changes.as_ref().map(serde_json::to_string).transpose()?;
        let metadata = entry.metadata.as_ref().map(serde_json::to_string).transpose()?;

        Ok(ActiveModel {
            id: Set(entry.id),
            actor_id: Set(entry.actor_id),
            action: Set(entry.action.clone()),
            category: Set(entry.category.to_string()),
            resource_type: Set(entry.resource_type.clone()),
            resource_id: Set(entry.resource_id.clone()),
            changes: Set(changes),
            metadata: Set(metadata),
            ip_address: Set(entry.ip_address.clone()),
            user_agent: Set(entry.user_agent.clone()),
            created_at: Set(entry.created_at.into()),
        })
    }
}
