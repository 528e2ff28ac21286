//! Audit logging
//!
//! Append-only record of privileged mutations. Writes are best effort: the
//! [`AuditLogger`] never lets an audit failure reach the caller.

mod database;
mod memory;
mod types;
mod writer;

pub use database::DatabaseAuditWriter;
pub use memory::MemoryAuditWriter;
pub use types::{AuditCategory, AuditChanges, AuditLogEntry, NewAuditEntry};
pub use writer::{AuditLogger, AuditWriter};
