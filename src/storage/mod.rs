//! Persistent storage
//!
//! Role assignments and audit entries live in a relational database accessed
//! through SeaORM.

pub mod database;

pub use database::Database;
