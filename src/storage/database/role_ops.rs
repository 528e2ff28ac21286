use crate::auth::identity::{AccountStatus, RoleAssignment, RoleDirectory, RoleStore};
use crate::auth::rbac::Role;
use crate::utils::error::{ConsoleError, Result};
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::Database;
use super::entities::{self, user_role};

impl Database {
    /// Find the role assignment for a user
    pub async fn find_role_assignment(&self, user_id: Uuid) -> Result<Option<RoleAssignment>> {
        debug!("Finding role assignment for user: {}", user_id);

        let model = entities::UserRole::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(ConsoleError::Database)?;

        model.map(|m| m.to_assignment()).transpose()
    }

    /// List every role assignment, ordered by email
    pub async fn list_role_assignments(&self) -> Result<Vec<RoleAssignment>> {
        let models = entities::UserRole::find()
            .order_by_asc(user_role::Column::Email)
            .all(&self.db)
            .await
            .map_err(ConsoleError::Database)?;

        models.iter().map(|m| m.to_assignment()).collect()
    }

    /// Insert an assignment, replacing any existing row for the same user
    pub async fn upsert_role_assignment(&self, assignment: &RoleAssignment) -> Result<RoleAssignment> {
        debug!(
            "Upserting role assignment for user: {} ({})",
            assignment.user_id, assignment.role
        );

        let active_model = user_role::Model::from_assignment(assignment);
        entities::UserRole::insert(active_model)
            .on_conflict(
                OnConflict::column(user_role::Column::UserId)
                    .update_columns([
                        user_role::Column::Email,
                        user_role::Column::Role,
                        user_role::Column::Status,
                        user_role::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(ConsoleError::Database)?;

        Ok(assignment.clone())
    }

    /// Update an existing assignment
    pub async fn update_role_assignment(&self, assignment: &RoleAssignment) -> Result<RoleAssignment> {
        debug!("Updating role assignment for user: {}", assignment.user_id);
        Self::apply_role_update(&self.db, assignment).await
    }

    /// Update an assignment unless it would leave no active admin
    ///
    /// The active admin rows are locked for the rest of the transaction
    /// (`SELECT ... FOR UPDATE` where the backend supports it), so two
    /// concurrent demotions cannot both observe a second admin.
    pub async fn update_role_assignment_keeping_admin(
        &self,
        assignment: &RoleAssignment,
    ) -> Result<RoleAssignment> {
        debug!(
            "Updating role assignment for user: {} (keeping an active admin)",
            assignment.user_id
        );

        let txn = self.db.begin().await.map_err(ConsoleError::Database)?;

        let active_admins = entities::UserRole::find()
            .filter(user_role::Column::Role.eq(Role::Admin.as_str()))
            .filter(user_role::Column::Status.eq(AccountStatus::Active.as_str()))
            .lock_exclusive()
            .all(&txn)
            .await
            .map_err(ConsoleError::Database)?;

        let target_is_active_admin = active_admins
            .iter()
            .any(|model| model.user_id == assignment.user_id);
        if target_is_active_admin && !assignment.is_active_admin() && active_admins.len() <= 1 {
            // Dropping the transaction rolls it back
            return Err(ConsoleError::conflict(
                "Cannot demote or deactivate the last active admin",
            ));
        }

        let updated = Self::apply_role_update(&txn, assignment).await?;
        txn.commit().await.map_err(ConsoleError::Database)?;
        Ok(updated)
    }

    async fn apply_role_update<C: ConnectionTrait>(
        conn: &C,
        assignment: &RoleAssignment,
    ) -> Result<RoleAssignment> {
        let mut model: user_role::ActiveModel = entities::UserRole::find_by_id(assignment.user_id)
            .one(conn)
            .await
            .map_err(ConsoleError::Database)?
            .ok_or_else(|| ConsoleError::not_found(format!("User not found: {}", assignment.user_id)))?
            .into();

        model.email = Set(assignment.email.clone());
        model.role = Set(assignment.role.to_string());
        model.status = Set(assignment.status.to_string());
        model.updated_at = Set(assignment.updated_at.into());

        let updated = model.update(conn).await.map_err(ConsoleError::Database)?;
        updated.to_assignment()
    }

    /// Count admins whose account is active
    pub async fn count_active_admins(&self) -> Result<u64> {
        entities::UserRole::find()
            .filter(user_role::Column::Role.eq(Role::Admin.as_str()))
            .filter(user_role::Column::Status.eq(AccountStatus::Active.as_str()))
            .count(&self.db)
            .await
            .map_err(ConsoleError::Database)
    }
}

#[async_trait]
impl RoleStore for Database {
    async fn role_for_user(&self, user_id: Uuid) -> Result<Option<RoleAssignment>> {
        self.find_role_assignment(user_id).await
    }
}

#[async_trait]
impl RoleDirectory for Database {
    async fn list_assignments(&self) -> Result<Vec<RoleAssignment>> {
        self.list_role_assignments().await
    }

    async fn upsert_assignment(&self, assignment: RoleAssignment) -> Result<RoleAssignment> {
        self.upsert_role_assignment(&assignment).await
    }

    async fn update_assignment(&self, assignment: RoleAssignment) -> Result<RoleAssignment> {
        self.update_role_assignment(&assignment).await
    }

    async fn update_assignment_keeping_admin(
        &self,
        assignment: RoleAssignment,
    ) -> Result<RoleAssignment> {
        self.update_role_assignment_keeping_admin(&assignment).await
    }

    async fn count_active_admins(&self) -> Result<u64> {
        Database::count_active_admins(self).await
    }
}
