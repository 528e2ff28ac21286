//! User management service

use super::types::{UpdateUserRequest, UserSummary};
use crate::audit::{AuditCategory, AuditLogger, NewAuditEntry};
use crate::auth::guard::{Requirement, evaluate};
use crate::auth::identity::{Identity, RoleAssignment, RoleDirectory};
use crate::auth::rbac::Permission;
use crate::core::RequestContext;
use crate::utils::error::{ConsoleError, Result};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Lists users and applies role/status changes
#[derive(Clone)]
pub struct UserManagementService {
    directory: Arc<dyn RoleDirectory>,
    audit: AuditLogger,
    /// Held from reading the target until its row is written
    updates: Arc<Mutex<()>>,
}

impl std::fmt::Debug for UserManagementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserManagementService")
            .field("audit", &self.audit)
            .finish_non_exhaustive()
    }
}

impl UserManagementService {
    pub fn new(directory: Arc<dyn RoleDirectory>, audit: AuditLogger) -> Self {
        Self {
            directory,
            audit,
            updates: Arc::new(Mutex::new(())),
        }
    }

    /// Every user with a role assignment
    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let assignments = self.directory.list_assignments().await?;
        Ok(assignments.into_iter().map(UserSummary::from).collect())
    }

    /// Change a user's role and/or status on behalf of `actor`
    ///
    /// Actors cannot change their own role or deactivate themselves, and the
    /// last active admin can be neither demoted nor deactivated. Updates
    /// through one service run one at a time; the store enforces the
    /// last-admin rule atomically for writers sharing it. The audit entry is
    /// best effort and never fails the update.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        actor: &Identity,
        target_id: Uuid,
        request: UpdateUserRequest,
    ) -> Result<UserSummary> {
        if !evaluate(Some(actor), Requirement::Permission(Permission::ManageUserRoles)).is_allowed() {
            return Err(ConsoleError::forbidden("Requires permission MANAGE_USER_ROLES"));
        }
        if request.is_empty() {
            return Err(ConsoleError::validation("Nothing to update"));
        }

        let serialized = self.updates.lock().await;

        let current = self
            .directory
            .role_for_user(target_id)
            .await?
            .ok_or_else(|| ConsoleError::not_found(format!("User not found: {}", target_id)))?;

        let new_role = request.role.unwrap_or(current.role);
        let new_status = request.status.unwrap_or(current.status);
        let role_changed = new_role != current.role;
        let status_changed = new_status != current.status;

        if !role_changed && !status_changed {
            return Ok(current.into());
        }

        if actor.user_id == target_id {
            if role_changed {
                return Err(ConsoleError::validation("You cannot change your own role"));
            }
            if !new_status.is_active() {
                return Err(ConsoleError::validation("You cannot deactivate your own account"));
            }
        }

        let updated = RoleAssignment {
            role: new_role,
            status: new_status,
            updated_at: Utc::now(),
            ..current.clone()
        };
        let updated = self.directory.update_assignment_keeping_admin(updated).await?;
        drop(serialized);

        info!(
            actor = %actor.user_id,
            target = %target_id,
            role = %updated.role,
            status = %updated.status,
            "User access updated"
        );

        let (action, category) = if role_changed {
            ("user.role_updated", AuditCategory::Role)
        } else {
            ("user.status_updated", AuditCategory::User)
        };
        let entry = NewAuditEntry::new(actor.user_id, action, category)
            .resource("user", target_id.to_string())
            .changes(
                Some(json!({ "role": current.role, "status": current.status })),
                Some(json!({ "role": updated.role, "status": updated.status })),
            )
            .metadata(json!({ "request_id": ctx.request_id }))
            .with_context(ctx);
        self.audit.record(entry).await;

        Ok(updated.into())
    }
}
