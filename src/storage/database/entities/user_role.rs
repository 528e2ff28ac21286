use crate::auth::identity::{AccountStatus, RoleAssignment};
use crate::auth::rbac::Role;
use crate::utils::error::ConsoleError;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User role database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    /// User ID issued by the authentication provider
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,

    /// Email address
    pub email: String,

    /// Role name
    pub role: String,

    /// Account status
    pub status: String,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// Last update timestamp
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert to a role assignment
    ///
    /// A row with an unknown role or status is an error, never a default role.
    pub fn to_assignment(&self) -> crate::utils::error::Result<RoleAssignment> {
        let role = Role::from_str(&self.role).map_err(ConsoleError::internal)?;
        let status = AccountStatus::from_str(&self.status).map_err(ConsoleError::internal)?;

        Ok(RoleAssignment {
            user_id: self.user_id,
            email: self.email.clone(),
            role,
            status,
            created_at: self.created_at.naive_utc().and_utc(),
            updated_at: self.updated_at.naive_utc().and_utc(),
        })
    }

    /// Convert a role assignment to an active model
    pub fn from_assignment(assignment: &RoleAssignment) -> ActiveModel {
        ActiveModel {
            user_id: Set(assignment.user_id),
            email: Set(assignment.email.clone()),
            role: Set(assignment.role.to_string()),
            status: Set(assignment.status.to_string()),
            created_at: Set(assignment.created_at.into()),
            updated_at: Set(assignment.updated_at.into()),
        }
    }
}
