//! Authentication and authorization
//!
//! [`rbac`] holds the static permission model, [`identity`] resolves who is
//! calling, and [`guard`] enforces requirements at every call site.

pub mod guard;
pub mod identity;
pub mod rbac;

pub use guard::{Decision, Guard, GuardError, Requirement, evaluate};
pub use identity::{Identity, IdentityResolver};
pub use rbac::{Permission, Role};
