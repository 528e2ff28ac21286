//! Audit log endpoint

use crate::auth::guard::api::require_api_permission;
use crate::auth::rbac::Permission;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{ConsoleError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

const DEFAULT_LIMIT: u64 = 50;
const MAX_LIMIT: u64 = 500;

/// Configure audit routes (mounted under `/api/admin`)
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/audit-logs", web::get().to(list_audit_logs));
}

/// Query parameters for the audit listing
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<u64>,
}

/// Most recent audit entries, newest first
///
/// The query string is parsed after the guard passes.
pub async fn list_audit_logs(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    require_api_permission(&req, Permission::ViewAuditLogs).await?;

    let query = web::Query::<AuditQuery>::from_query(req.query_string())
        .map_err(|e| ConsoleError::bad_request(format!("Invalid query: {}", e)))?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let entries = state.audit.recent(limit).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(entries)))
}
