//! Identity resolution
//!
//! Session providers, role stores, and the resolver that combines them.

mod resolver;
mod session;
mod store;
mod types;

#[cfg(test)]
pub use resolver::MockSessionProvider;
pub use resolver::{IdentityResolver, RoleStore, SessionProvider};
pub use session::{JwtSessionProvider, SessionClaims};
pub use store::{MemoryRoleStore, RoleDirectory};
pub use types::{AccountStatus, Identity, RoleAssignment, Session};
