//! Identity resolution
//!
//! Combines the session provider ("who is calling") with the role store
//! ("what may they do") into an [`Identity`]. Resolution happens on every
//! request; nothing is cached.

use super::types::{Identity, RoleAssignment, Session};
use crate::core::RequestContext;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Source of the caller's authenticated session
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Session for the request, or `None` when there is no valid session
    async fn current_session(&self, ctx: &RequestContext) -> Result<Option<Session>>;
}

/// Lookup of a user's role and account status
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Assignment for `user_id`, or `None` when the user has no role row
    async fn role_for_user(&self, user_id: Uuid) -> Result<Option<RoleAssignment>>;
}

/// Resolves the current identity from a session provider and a role store
#[derive(Clone)]
pub struct IdentityResolver {
    sessions: Arc<dyn SessionProvider>,
    roles: Arc<dyn RoleStore>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver").finish_non_exhaustive()
    }
}

impl IdentityResolver {
    pub fn new(sessions: Arc<dyn SessionProvider>, roles: Arc<dyn RoleStore>) -> Self {
        Self { sessions, roles }
    }

    /// Resolve the identity for this request
    pub async fn resolve(&self, ctx: &RequestContext) -> Result<Option<Identity>> {
        let Some(session) = self.sessions.current_session(ctx).await? else {
            debug!(request_id = %ctx.request_id, "No session for request");
            return Ok(None);
        };

        let Some(assignment) = self.roles.role_for_user(session.user_id).await? else {
            debug!(
                request_id = %ctx.request_id,
                user_id = %session.user_id,
                "Session without role assignment"
            );
            return Ok(None);
        };

        Ok(Some(Identity {
            user_id: session.user_id,
            email: session.email,
            role: assignment.role,
            status: assignment.status,
        }))
    }
}
