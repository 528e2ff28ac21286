//! User management request and response types

use crate::auth::identity::{AccountStatus, RoleAssignment};
use crate::auth::rbac::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `PATCH /api/admin/users/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub status: Option<AccountStatus>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.status.is_none()
    }
}

/// User as listed by the admin API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub updated_at: DateTime<Utc>,
}

impl From<RoleAssignment> for UserSummary {
    fn from(assignment: RoleAssignment) -> Self {
        Self {
            user_id: assignment.user_id,
            email: assignment.email,
            role: assignment.role,
            status: assignment.status,
            updated_at: assignment.updated_at,
        }
    }
}
