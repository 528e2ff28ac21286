/// Audit log entity module
pub mod audit_log;
/// User role entity module
pub mod user_role;

pub use audit_log::Entity as AuditLog;
pub use user_role::Entity as UserRole;
