//! User administration endpoints

use crate::auth::guard::api::{request_context, require_api_permission, require_api_role};
use crate::auth::rbac::{Permission, Role};
use crate::core::user_management::UpdateUserRequest;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{ConsoleError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

/// Configure user routes (mounted under `/api/admin`)
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("/{id}", web::patch().to(update_user)),
    );
}

/// List every user with a role assignment
pub async fn list_users(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    require_api_role(&req, Role::Moderator).await?;

    let users = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

/// Change a user's role or status
///
/// The id and body are parsed only after the guard passes, so callers without
/// `MANAGE_USER_ROLES` always get 403 whatever they send.
pub async fn update_user(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse> {
    let actor = require_api_permission(&req, Permission::ManageUserRoles).await?;
    let ctx = request_context(&req);

    let target_id = Uuid::parse_str(&path.into_inner())
        .map_err(|e| ConsoleError::bad_request(format!("Invalid user id: {}", e)))?;
    let request: UpdateUserRequest = serde_json::from_slice(&body)
        .map_err(|e| ConsoleError::bad_request(format!("Invalid request body: {}", e)))?;

    let updated = state
        .users
        .update_user(&ctx, &actor, target_id, request)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}
