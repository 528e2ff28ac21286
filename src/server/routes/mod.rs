//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod audit;
pub mod auth;
pub mod health;
pub mod pages;
pub mod users;

use crate::auth::rbac::Role;
use crate::server::middleware::RoleGate;
use actix_web::web;
use serde::Serialize;

/// Standard API response structure
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .service(
            web::scope("/api/admin")
                .wrap(RoleGate::new(Role::Moderator))
                .configure(users::configure_routes)
                .configure(audit::configure_routes),
        )
        .configure(pages::configure_routes);
}
