//! Database storage implementation using SeaORM
//!
//! Postgres or SQLite, selected by URL. The schema is owned by the migrations
//! in [`migration`] and applied with [`Database::migrate`].

mod audit_ops;
mod connection;
/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
mod role_ops;

use sea_orm::DatabaseConnection;

/// SeaORM-backed store for role assignments and audit logs
#[derive(Debug, Clone)]
pub struct Database {
    db: DatabaseConnection,
    backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}
