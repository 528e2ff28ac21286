//! Page guard
//!
//! Server-rendered pages never show an error body for access failures; they
//! redirect. Unauthenticated callers go to the login page with a `next`
//! parameter, forbidden callers go to the unauthorized page.

use super::{Guard, GuardError};
use crate::auth::identity::Identity;
use crate::auth::rbac::Permission;
use crate::config::AuthConfig;
use crate::core::RequestContext;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Redirect produced by a failed page guard
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("redirect to {location}")]
pub struct Redirect {
    location: String,
}

impl Redirect {
    pub fn to<S: Into<String>>(location: S) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl ResponseError for Redirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::FOUND
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Found()
            .insert_header((LOCATION, self.location.as_str()))
            .finish()
    }
}

/// Guard adapter for server-rendered pages
#[derive(Debug, Clone)]
pub struct PageGuard {
    guard: Guard,
    login_path: String,
    unauthorized_path: String,
}

impl PageGuard {
    pub fn new(guard: Guard, config: &AuthConfig) -> Self {
        Self {
            guard,
            login_path: config.login_path.clone(),
            unauthorized_path: config.unauthorized_path.clone(),
        }
    }

    /// Redirect target for a guard failure
    pub fn redirect_for(&self, ctx: &RequestContext, err: &GuardError) -> Redirect {
        match err {
            GuardError::Unauthenticated => {
                let next: String = url::form_urlencoded::byte_serialize(ctx.path.as_bytes()).collect();
                Redirect::to(format!("{}?next={}", self.login_path, next))
            }
            GuardError::Forbidden { .. } => Redirect::to(self.unauthorized_path.clone()),
        }
    }

    fn redirect_on_failure(
        &self,
        ctx: &RequestContext,
        result: Result<Identity, GuardError>,
    ) -> Result<Identity, Redirect> {
        result.map_err(|e| self.redirect_for(ctx, &e))
    }

    /// Current identity for conditional rendering; never redirects
    pub async fn current_user(&self, ctx: &RequestContext) -> Option<Identity> {
        self.guard.current_user(ctx).await
    }

    pub async fn require_admin(&self, ctx: &RequestContext) -> Result<Identity, Redirect> {
        let result = self.guard.require_admin(ctx).await;
        self.redirect_on_failure(ctx, result)
    }

    pub async fn require_moderator(&self, ctx: &RequestContext) -> Result<Identity, Redirect> {
        let result = self.guard.require_moderator(ctx).await;
        self.redirect_on_failure(ctx, result)
    }

    pub async fn require_permission(
        &self,
        ctx: &RequestContext,
        permission: Permission,
    ) -> Result<Identity, Redirect> {
        let result = self.guard.require_permission(ctx, permission).await;
        self.redirect_on_failure(ctx, result)
    }

    /// Visibility flag for page fragments such as a create button
    pub async fn has_permission(&self, ctx: &RequestContext, permission: Permission) -> bool {
        self.guard.has_permission(ctx, permission).await
    }
}
