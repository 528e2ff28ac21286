//! API route guard
//!
//! Handlers call [`require_api_role`] or [`require_api_permission`] and use
//! `?`: a failure becomes a [`ConsoleError`] which renders as 401 or 403 with
//! the `{ "success": false, "error": ... }` envelope.

use super::{Guard, Requirement};
use crate::auth::identity::Identity;
use crate::auth::rbac::{Permission, Role};
use crate::core::RequestContext;
use crate::utils::error::{ConsoleError, Result};
use actix_web::{HttpMessage, HttpRequest, web};
use tracing::warn;

/// Request context installed by the context middleware
///
/// A request without one is treated as anonymous.
pub fn request_context(req: &HttpRequest) -> RequestContext {
    match req.extensions().get::<RequestContext>() {
        Some(ctx) => ctx.clone(),
        None => {
            warn!(path = %req.path(), "Request context missing; treating request as anonymous");
            RequestContext::new(req.path())
        }
    }
}

fn guard_of(req: &HttpRequest) -> Result<web::Data<Guard>> {
    req.app_data::<web::Data<Guard>>()
        .cloned()
        .ok_or_else(|| ConsoleError::internal("Guard is not registered as app data"))
}

/// Enforce `requirement` for an API request
pub async fn authorize_api(req: &HttpRequest, requirement: Requirement) -> Result<Identity> {
    let guard = guard_of(req)?;
    let ctx = request_context(req);
    guard
        .authorize(&ctx, requirement)
        .await
        .map_err(ConsoleError::from)
}

/// Enforce a minimum role for an API request
pub async fn require_api_role(req: &HttpRequest, minimum: Role) -> Result<Identity> {
    authorize_api(req, Requirement::MinimumRole(minimum)).await
}

/// Enforce a permission for an API request
pub async fn require_api_permission(req: &HttpRequest, permission: Permission) -> Result<Identity> {
    authorize_api(req, Requirement::Permission(permission)).await
}

/// Any active identity
pub async fn require_api_identity(req: &HttpRequest) -> Result<Identity> {
    authorize_api(req, Requirement::Authenticated).await
}

