//! Guard layer
//!
//! [`Guard`] resolves the caller's identity and evaluates a [`Requirement`]
//! against the RBAC table. The adapters in [`page`], [`api`] and [`view`]
//! only translate the outcome into a redirect, an HTTP status, or fallback
//! content.

pub mod api;
mod error;
pub mod page;
#[cfg(test)]
mod tests;
pub mod view;

pub use error::GuardError;

use crate::auth::identity::{Identity, IdentityResolver};
use crate::auth::rbac::{Permission, Role, check_permission, role_meets_minimum};
use crate::core::RequestContext;
use std::fmt;
use tracing::{debug, warn};

/// What an operation demands of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any active, authenticated identity
    Authenticated,
    /// A specific permission
    Permission(Permission),
    /// At least this role
    MinimumRole(Role),
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Authenticated => f.write_str("authenticated"),
            Requirement::Permission(p) => write!(f, "permission {}", p),
            Requirement::MinimumRole(r) => write!(f, "role {}", r),
        }
    }
}

/// Outcome of a single guard evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    DenyUnauthenticated,
    DenyForbidden(String),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Evaluate a requirement against an optional identity
///
/// Accounts that are not `active` are denied every requirement.
pub fn evaluate(identity: Option<&Identity>, requirement: Requirement) -> Decision {
    let Some(identity) = identity else {
        return Decision::DenyUnauthenticated;
    };

    if !identity.status.is_active() {
        return Decision::DenyForbidden(format!("Account is {}", identity.status));
    }

    match requirement {
        Requirement::Authenticated => Decision::Allow,
        Requirement::Permission(permission) => {
            let check = check_permission(identity.role, permission);
            match check.denial_reason {
                None => Decision::Allow,
                Some(reason) => Decision::DenyForbidden(reason),
            }
        }
        Requirement::MinimumRole(required) => {
            if role_meets_minimum(identity.role, required) {
                Decision::Allow
            } else {
                Decision::DenyForbidden(format!("Requires {} role", required))
            }
        }
    }
}

/// Request guard shared by every call-site adapter
#[derive(Debug, Clone)]
pub struct Guard {
    resolver: IdentityResolver,
}

impl Guard {
    pub fn new(resolver: IdentityResolver) -> Self {
        Self { resolver }
    }

    /// Current identity, or `None` when there is none or resolution failed
    pub async fn current_user(&self, ctx: &RequestContext) -> Option<Identity> {
        match self.resolver.resolve(ctx).await {
            Ok(identity) => identity,
            Err(e) => {
                warn!(request_id = %ctx.request_id, "Identity resolution failed: {}", e);
                None
            }
        }
    }

    /// Resolve the identity and enforce `requirement`
    pub async fn authorize(
        &self,
        ctx: &RequestContext,
        requirement: Requirement,
    ) -> Result<Identity, GuardError> {
        let identity = self.current_user(ctx).await;

        match evaluate(identity.as_ref(), requirement) {
            Decision::Allow => {
                debug!(request_id = %ctx.request_id, %requirement, "Access granted");
                identity.ok_or(GuardError::Unauthenticated)
            }
            Decision::DenyUnauthenticated => {
                debug!(request_id = %ctx.request_id, %requirement, "Access denied: unauthenticated");
                Err(GuardError::Unauthenticated)
            }
            Decision::DenyForbidden(reason) => {
                debug!(request_id = %ctx.request_id, %requirement, %reason, "Access denied: forbidden");
                Err(GuardError::forbidden(reason))
            }
        }
    }

    pub async fn require_authenticated(&self, ctx: &RequestContext) -> Result<Identity, GuardError> {
        self.authorize(ctx, Requirement::Authenticated).await
    }

    pub async fn require_permission(
        &self,
        ctx: &RequestContext,
        permission: Permission,
    ) -> Result<Identity, GuardError> {
        self.authorize(ctx, Requirement::Permission(permission)).await
    }

    pub async fn require_role(&self, ctx: &RequestContext, minimum: Role) -> Result<Identity, GuardError> {
        self.authorize(ctx, Requirement::MinimumRole(minimum)).await
    }

    pub async fn require_admin(&self, ctx: &RequestContext) -> Result<Identity, GuardError> {
        self.require_role(ctx, Role::Admin).await
    }

    pub async fn require_moderator(&self, ctx: &RequestContext) -> Result<Identity, GuardError> {
        self.require_role(ctx, Role::Moderator).await
    }

    /// Boolean form of [`Guard::require_permission`]; never fails
    pub async fn has_permission(&self, ctx: &RequestContext, permission: Permission) -> bool {
        self.require_permission(ctx, permission).await.is_ok()
    }
}
