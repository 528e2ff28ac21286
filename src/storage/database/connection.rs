use crate::config::DatabaseConfig;
use crate::utils::error::{ConsoleError, Result};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::entities;
use super::migration::Migrator;
use super::{Database, DatabaseBackendType};

impl Database {
    /// Connect using the configured URL
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        if let Some(path) = config.sqlite_path() {
            Self::ensure_parent_dir(path)?;
        }

        let mut opt = ConnectOptions::new(config.url.clone());
        if config.is_in_memory() {
            // Every pooled connection would otherwise see its own empty database
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(config.max_connections)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(3600));
        }
        opt.connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = sea_orm::Database::connect(opt)
            .await
            .map_err(ConsoleError::Database)?;

        let backend_type = if config.is_sqlite() {
            DatabaseBackendType::SQLite
        } else {
            DatabaseBackendType::PostgreSQL
        };
        info!("Database connection established ({:?})", backend_type);

        Ok(Self { db, backend_type })
    }

    fn ensure_parent_dir(path: &str) -> Result<()> {
        let Some(parent) = std::path::Path::new(path).parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() || parent.exists() {
            return Ok(());
        }
        std::fs::create_dir_all(parent).map_err(|e| {
            ConsoleError::internal(format!("Failed to create data directory: {}", e))
        })
    }

    /// Get the current backend type
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            ConsoleError::Database(e)
        })?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing database health check");

        entities::UserRole::find()
            .limit(1)
            .all(&self.db)
            .await
            .map_err(ConsoleError::Database)?;

        debug!("Database health check passed");
        Ok(())
    }
}
