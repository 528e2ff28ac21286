//! Identity types

use crate::auth::rbac::{Permission, Role, permissions_for_role, role_has_permission, role_meets_minimum};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Active account
    Active,
    /// Deactivated by an administrator
    Inactive,
    /// Suspended pending review
    Suspended,
    /// Invited, not yet confirmed
    Pending,
}

impl AccountStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::Suspended => "suspended",
            AccountStatus::Pending => "pending",
        }
    }

    pub fn is_active(self) -> bool {
        self == AccountStatus::Active
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            "suspended" => Ok(AccountStatus::Suspended),
            "pending" => Ok(AccountStatus::Pending),
            _ => Err(format!("Invalid account status: {}", s)),
        }
    }
}

/// What the session provider knows about the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
}

/// Row of the `user_roles` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoleAssignment {
    /// New active assignment stamped with the current time
    pub fn new<S: Into<String>>(user_id: Uuid, email: S, role: Role) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email: email.into(),
            role,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }

    /// Active admins are the ones the last-admin rule protects
    pub fn is_active_admin(&self) -> bool {
        self.role == Role::Admin && self.status.is_active()
    }
}

/// The resolved current actor for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
}

impl Identity {
    pub fn new<S: Into<String>>(user_id: Uuid, email: S, role: Role) -> Self {
        Self {
            user_id,
            email: email.into(),
            role,
            status: AccountStatus::Active,
        }
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        role_has_permission(self.role, permission)
    }

    pub fn meets_role(&self, required: Role) -> bool {
        role_meets_minimum(self.role, required)
    }

    pub fn is_admin(&self) -> bool {
        self.meets_role(Role::Admin)
    }

    pub fn is_moderator(&self) -> bool {
        self.meets_role(Role::Moderator)
    }

    pub fn permissions(&self) -> &'static [Permission] {
        permissions_for_role(self.role)
    }
}
