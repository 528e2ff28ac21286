//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::{debug, warn};

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health status payload
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    /// `None` when no database is attached
    pub database: Option<bool>,
}

/// Basic health check endpoint
///
/// Public. Reports `degraded` with 503 when the database does not answer.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let database = match &state.database {
        Some(db) => match db.health_check().await {
            Ok(()) => Some(true),
            Err(e) => {
                warn!("Database health check failed: {}", e);
                Some(false)
            }
        },
        None => None,
    };

    let healthy = database != Some(false);
    let body = ApiResponse::success(HealthStatus {
        status: if healthy { "healthy" } else { "degraded" },
        version: crate::VERSION,
        git_hash: crate::build_info().git_hash,
        database,
    });

    if healthy {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(body))
    }
}
