//! Role-Based Access Control (RBAC)
//!
//! Static role→permission table and the pure check primitives built on it.

mod permissions;
mod roles;
mod types;

pub use permissions::{check_permission, permissions_for_role, role_has_permission, role_meets_minimum};
pub use types::{Permission, PermissionCheck, Role};
