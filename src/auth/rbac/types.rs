//! RBAC type definitions

use serde::{Deserialize, Serialize};

/// Console role, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including settings and role management
    Admin,
    /// Content and user moderation
    Moderator,
    /// Read access to the console
    User,
}

/// A single named capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
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
}

/// Permission check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    /// Whether permission is granted
    pub granted: bool,
    /// Role that was checked
    pub role: Role,
    /// Permission that was checked
    pub permission: Permission,
    /// Reason for denial (if not granted)
    pub denial_reason: Option<String>,
}
