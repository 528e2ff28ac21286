//! User role and status management
//!
//! The only mutation this crate owns. Guards decide whether the actor may
//! manage roles at all; the service adds the rules that depend on the target.

mod service;
mod types;

pub use service::UserManagementService;
pub use types::{UpdateUserRequest, UserSummary};
