//! Application state shared across HTTP handlers

use crate::audit::{AuditLogger, DatabaseAuditWriter, MemoryAuditWriter};
use crate::auth::guard::Guard;
use crate::auth::guard::page::PageGuard;
use crate::auth::identity::{
    IdentityResolver, JwtSessionProvider, RoleAssignment, RoleDirectory, RoleStore,
    SessionProvider,
};
use crate::auth::rbac::Role;
use crate::config::{AuditBackend, Config};
use crate::core::user_management::UserManagementService;
use crate::storage::Database;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// HTTP server state shared across handlers
///
/// Everything here is immutable after startup; per-request data travels in
/// [`RequestContext`](crate::core::RequestContext) instead.
#[derive(Clone)]
pub struct AppState {
    /// Console configuration (shared read-only)
    pub config: Arc<Config>,
    /// Request guard
    pub guard: Guard,
    /// Redirecting guard for server-rendered pages
    pub pages: PageGuard,
    /// User role management
    pub users: UserManagementService,
    /// Audit log
    pub audit: AuditLogger,
    /// Database, when the state was built from configuration
    pub database: Option<Arc<Database>>,
    directory: Arc<dyn RoleDirectory>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("guard", &self.guard)
            .field("audit", &self.audit)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Connect storage and wire every service from configuration
    pub async fn new(config: Config) -> Result<Self> {
        let database = Arc::new(Database::new(&config.storage().database).await?);
        database.migrate().await?;

        let audit = if !config.audit().enabled {
            info!("Audit logging disabled");
            AuditLogger::disabled()
        } else {
            match config.audit().backend {
                AuditBackend::Database => {
                    AuditLogger::new(Arc::new(DatabaseAuditWriter::new(database.clone())))
                }
                AuditBackend::Memory => AuditLogger::new(Arc::new(MemoryAuditWriter::new())),
            }
        };

        let sessions: Arc<dyn SessionProvider> = Arc::new(JwtSessionProvider::new(config.auth()));
        let directory: Arc<dyn RoleDirectory> = database.clone();

        let state = Self::from_parts(config, sessions, directory, audit, Some(database));
        state.bootstrap_admins().await?;
        Ok(state)
    }

    /// Wire services from already-built parts
    pub fn from_parts(
        config: Config,
        sessions: Arc<dyn SessionProvider>,
        directory: Arc<dyn RoleDirectory>,
        audit: AuditLogger,
        database: Option<Arc<Database>>,
    ) -> Self {
        let roles: Arc<dyn RoleStore> = directory.clone();
        let guard = Guard::new(IdentityResolver::new(sessions, roles));
        let pages = PageGuard::new(guard.clone(), config.auth());
        let users = UserManagementService::new(directory.clone(), audit.clone());

        Self {
            config: Arc::new(config),
            guard,
            pages,
            users,
            audit,
            database,
            directory,
        }
    }

    /// Grant `admin` to configured users that have no role row yet
    pub async fn bootstrap_admins(&self) -> Result<()> {
        for admin in &self.config.auth().bootstrap_admins {
            if self.directory.role_for_user(admin.user_id).await?.is_some() {
                continue;
            }
            self.directory
                .upsert_assignment(RoleAssignment::new(admin.user_id, admin.email.clone(), Role::Admin))
                .await?;
            info!(user_id = %admin.user_id, "Bootstrapped admin account");
        }
        Ok(())
    }
}
