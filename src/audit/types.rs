//! Audit log types

use crate::core::RequestContext;
use crate::utils::error::{ConsoleError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const MAX_ACTION_LEN: usize = 128;

/// Closed set of audit categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditCategory {
    Auth,
    User,
    Role,
    Setting,
    System,
}

impl AuditCategory {
    pub const ALL: [AuditCategory; 5] = [
        AuditCategory::Auth,
        AuditCategory::User,
        AuditCategory::Role,
        AuditCategory::Setting,
        AuditCategory::System,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            AuditCategory::Auth => "auth",
            AuditCategory::User => "user",
            AuditCategory::Role => "role",
            AuditCategory::Setting => "setting",
            AuditCategory::System => "system",
        }
    }
}

impl fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditCategory {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        AuditCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ConsoleError::validation(format!("Unknown audit category: {}", s)))
    }
}

/// Before/after payload of a mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditChanges {
    #[serde(default)]
    pub before: Option<serde_json::Value>,
    #[serde(default)]
    pub after: Option<serde_json::Value>,
}

/// Audit entry as submitted by a mutation's code path
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub actor_id: Uuid,
    pub action: String,
    pub category: AuditCategory,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub changes: Option<AuditChanges>,
    pub metadata: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl NewAuditEntry {
    pub fn new<S: Into<String>>(actor_id: Uuid, action: S, category: AuditCategory) -> Self {
        Self {
            actor_id,
            action: action.into(),
            category,
            resource_type: None,
            resource_id: None,
            changes: None,
            metadata: None,
            ip_address: None,
            user_agent: None,
        }
    }

    pub fn resource<T: Into<String>, I: Into<String>>(mut self, resource_type: T, resource_id: I) -> Self {
        self.resource_type = Some(resource_type.into());
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn changes(
        mut self,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> Self {
        self.changes = Some(AuditChanges { before, after });
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Copy client address and user agent from the request
    pub fn with_context(mut self, ctx: &RequestContext) -> Self {
        self.ip_address = ctx.client_ip.clone();
        self.user_agent = ctx.user_agent.clone();
        self
    }

    /// Check the entry before it reaches a writer
    pub fn validate(&self) -> Result<()> {
        if self.action.is_empty() {
            return Err(ConsoleError::validation("Audit action cannot be empty"));
        }
        if self.action.len() > MAX_ACTION_LEN {
            return Err(ConsoleError::validation(format!(
                "Audit action exceeds {} characters",
                MAX_ACTION_LEN
            )));
        }
        let valid_chars = self
            .action
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.');
        if !valid_chars {
            return Err(ConsoleError::validation(format!(
                "Invalid audit action: {}",
                self.action
            )));
        }
        if self.resource_id.is_some() && self.resource_type.is_none() {
            return Err(ConsoleError::validation(
                "Audit resource id requires a resource type",
            ));
        }
        Ok(())
    }
}

/// Persisted, immutable audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub action: String,
    pub category: AuditCategory,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub changes: Option<AuditChanges>,
    pub metadata: Option<serde_json::Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Stamp a validated submission with an id and timestamp
    pub fn from_new(entry: NewAuditEntry) -> Self {
        Self {
            id: Uuid::new_v4(),
            actor_id: entry.actor_id,
            action: entry.action,
            category: entry.category,
            resource_type: entry.resource_type,
            resource_id: entry.resource_id,
            changes: entry.changes,
            metadata: entry.metadata,
            ip_address: entry.ip_address,
            user_agent: entry.user_agent,
            created_at: Utc::now(),
        }
    }
}
