//! # console-guard
//!
//! Role-based access control for a multi-tenant admin console.
//!
//! ## Features
//!
//! - **Static permission model**: three roles, each mapped to an explicit permission set
//! - **Per-request identity**: session provider plus role store, resolved fresh on every request
//! - **Guards**: one decision function behind page redirects, JSON 401/403 responses and client view state
//! - **Audit log**: best-effort, append-only record of privileged mutations
//!
//! ## Guarding a handler
//!
//! ```rust,no_run
//! use actix_web::{HttpRequest, HttpResponse};
//! use console_guard::Permission;
//! use console_guard::auth::guard::api::require_api_permission;
//!
//! async fn delete_agent(req: HttpRequest) -> console_guard::Result<HttpResponse> {
//!     let actor = require_api_permission(&req, Permission::DeleteAgents).await?;
//!     Ok(HttpResponse::Ok().body(format!("deleted by {}", actor.email)))
//! }
//! ```
//!
//! ## Running the console
//!
//! ```rust,no_run
//! use console_guard::{Config, ConsoleServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/console.yaml").await?;
//!     ConsoleServer::new(&config).await?.start().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod audit;
pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use audit::{AuditCategory, AuditLogger, NewAuditEntry};
pub use auth::guard::{Guard, GuardError, Requirement};
pub use auth::identity::Identity;
pub use auth::rbac::{Permission, Role};
pub use config::Config;
pub use core::RequestContext;
pub use server::{AppState, ConsoleServer};
pub use utils::error::{ConsoleError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information stamped by `build.rs`
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time as seconds since the Unix epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

/// Build information for this binary
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("CONSOLE_BUILD_TIME"),
        git_hash: env!("CONSOLE_GIT_HASH"),
    }
}
