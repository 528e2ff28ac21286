//! Current-user endpoint

use crate::auth::guard::api::request_context;
use crate::auth::guard::view::CurrentUserResponse;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{ConsoleError, Result};
use actix_web::{HttpRequest, HttpResponse, web};

/// Configure auth routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/auth/me", web::get().to(current_user));
}

/// Identity, permissions and role flags of the caller
///
/// Inactive accounts are still returned so the client can explain why access
/// is denied; every guarded operation rejects them.
pub async fn current_user(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let ctx = request_context(&req);
    let user = state
        .guard
        .current_user(&ctx)
        .await
        .ok_or_else(|| ConsoleError::unauthenticated("Authentication required"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(CurrentUserResponse::from_identity(Some(user)))))
}
