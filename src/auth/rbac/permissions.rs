//! Role→permission table and check primitives
//!
//! The table is the single source of truth for authorization. Page, API and
//! view guards all go through [`role_has_permission`] and
//! [`role_meets_minimum`].

use std::fmt;
use std::str::FromStr;

use super::types::{Permission, PermissionCheck, Role};

use Permission::*;

const ADMIN_PERMISSIONS: &[Permission] = &Permission::ALL;

const MODERATOR_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewUsers,
    EditUsers,
    ViewAgents,
    CreateAgents,
    EditAgents,
    ViewCorpus,
    CreateCorpus,
    EditCorpus,
    ViewProjects,
    CreateProjects,
    EditProjects,
    ViewAuditLogs,
    ViewSettings,
    ViewAnalytics,
    ExportAnalytics,
];

const USER_PERMISSIONS: &[Permission] = &[
    ViewDashboard,
    ViewAgents,
    ViewCorpus,
    ViewProjects,
    ViewAnalytics,
];

/// Permissions granted to `role`
pub fn permissions_for_role(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::Moderator => MODERATOR_PERMISSIONS,
        Role::User => USER_PERMISSIONS,
    }
}

/// Whether `role` holds `permission`
pub fn role_has_permission(role: Role, permission: Permission) -> bool {
    permissions_for_role(role).contains(&permission)
}

/// Whether `role` is at least as privileged as `required`
pub fn role_meets_minimum(role: Role, required: Role) -> bool {
    role.rank() >= required.rank()
}

/// Detailed permission check
pub fn check_permission(role: Role, permission: Permission) -> PermissionCheck {
    let granted = role_has_permission(role, permission);
    PermissionCheck {
        granted,
        role,
        permission,
        denial_reason: (!granted).then(|| format!("Missing permission: {}", permission)),
    }
}

impl Permission {
    /// Every permission the console knows
    pub const ALL: [Permission; 24] = [
        ViewDashboard,
        ViewUsers,
        CreateUsers,
        EditUsers,
        DeleteUsers,
        ManageUserRoles,
        ViewAgents,
        CreateAgents,
        EditAgents,
        DeleteAgents,
        ViewCorpus,
        CreateCorpus,
        EditCorpus,
        DeleteCorpus,
        ViewProjects,
        CreateProjects,
        EditProjects,
        DeleteProjects,
        ViewAuditLogs,
        ExportAuditLogs,
        ViewSettings,
        EditSettings,
        ViewAnalytics,
        ExportAnalytics,
    ];

    /// Wire name of the permission
    pub const fn as_str(self) -> &'static str {
        match self {
            ViewDashboard => "VIEW_DASHBOARD",
            ViewUsers => "VIEW_USERS",
            CreateUsers => "CREATE_USERS",
            EditUsers => "EDIT_USERS",
            DeleteUsers => "DELETE_USERS",
            ManageUserRoles => "MANAGE_USER_ROLES",
            ViewAgents => "VIEW_AGENTS",
            CreateAgents => "CREATE_AGENTS",
            EditAgents => "EDIT_AGENTS",
            DeleteAgents => "DELETE_AGENTS",
            ViewCorpus => "VIEW_CORPUS",
            CreateCorpus => "CREATE_CORPUS",
            EditCorpus => "EDIT_CORPUS",
            DeleteCorpus => "DELETE_CORPUS",
            ViewProjects => "VIEW_PROJECTS",
            CreateProjects => "CREATE_PROJECTS",
            EditProjects => "EDIT_PROJECTS",
            DeleteProjects => "DELETE_PROJECTS",
            ViewAuditLogs => "VIEW_AUDIT_LOGS",
            ExportAuditLogs => "EXPORT_AUDIT_LOGS",
            ViewSettings => "VIEW_SETTINGS",
            EditSettings => "EDIT_SETTINGS",
            ViewAnalytics => "VIEW_ANALYTICS",
            ExportAnalytics => "EXPORT_ANALYTICS",
        }
    }

    /// Human-readable description
    pub const fn description(self) -> &'static str {
        match self {
            ViewDashboard => "Open the console dashboard",
            ViewUsers => "List and inspect users",
            CreateUsers => "Invite or create users",
            EditUsers => "Edit user profiles",
            DeleteUsers => "Delete users",
            ManageUserRoles => "Change user roles and account status",
            ViewAgents => "List and inspect agents",
            CreateAgents => "Create agents",
            EditAgents => "Edit agents",
            DeleteAgents => "Delete agents",
            ViewCorpus => "Browse knowledge-base corpus",
            CreateCorpus => "Add corpus entities",
            EditCorpus => "Edit corpus entities",
            DeleteCorpus => "Delete corpus entities",
            ViewProjects => "List and inspect projects",
            CreateProjects => "Create projects",
            EditProjects => "Edit projects",
            DeleteProjects => "Delete projects",
            ViewAuditLogs => "Read the audit log",
            ExportAuditLogs => "Export the audit log",
            ViewSettings => "Read system settings",
            EditSettings => "Change system settings",
            ViewAnalytics => "Read analytics",
            ExportAnalytics => "Export analytics",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Invalid permission: {}", s))
    }
}
