//! Test fixtures and data factories

use super::database::test_db_config;
use console_guard::auth::identity::{AccountStatus, JwtSessionProvider, RoleAssignment};
use console_guard::config::{AuditBackend, BootstrapAdmin, Config};
use console_guard::{AppState, Role};
use uuid::Uuid;

/// Secret shared by every fixture token
pub const TEST_SECRET: &str = "Integration-Test-Secret-0123456789-abcdef";

/// Factory for role assignments
pub struct UserFactory;

impl UserFactory {
    /// Active assignment with a random id and email
    pub fn with_role(role: Role) -> RoleAssignment {
        let id = Uuid::new_v4();
        RoleAssignment::new(id, format!("{}-{}@example.com", role, &id.to_string()[..8]), role)
    }

    pub fn admin() -> RoleAssignment {
        Self::with_role(Role::Admin)
    }

    pub fn moderator() -> RoleAssignment {
        Self::with_role(Role::Moderator)
    }

    pub fn user() -> RoleAssignment {
        Self::with_role(Role::User)
    }

    pub fn suspended(role: Role) -> RoleAssignment {
        Self::with_role(role).with_status(AccountStatus::Suspended)
    }
}

/// Fully wired console on an in-memory database
pub struct TestConsole {
    pub state: AppState,
    pub sessions: JwtSessionProvider,
    pub admin: BootstrapAdmin,
}

impl TestConsole {
    /// Console whose only user is a bootstrapped admin
    pub async fn new() -> Self {
        let admin = BootstrapAdmin {
            user_id: Uuid::new_v4(),
            email: "root@example.com".to_string(),
        };

        let mut config = Config::default();
        config.console.auth.jwt_secret = TEST_SECRET.to_string();
        config.console.auth.bootstrap_admins = vec![admin.clone()];
        config.console.storage.database = test_db_config();
        config.console.audit.backend = AuditBackend::Database;

        let sessions = JwtSessionProvider::new(config.auth());
        let state = AppState::new(config)
            .await
            .expect("Failed to build application state");

        Self {
            state,
            sessions,
            admin,
        }
    }

    /// Bearer header value for a user
    pub fn bearer(&self, user_id: Uuid, email: &str) -> String {
        let token = self
            .sessions
            .issue_token(user_id, email)
            .expect("Failed to issue token");
        format!("Bearer {}", token)
    }

    /// Bearer header value for the bootstrapped admin
    pub fn admin_bearer(&self) -> String {
        self.bearer(self.admin.user_id, &self.admin.email)
    }
}
