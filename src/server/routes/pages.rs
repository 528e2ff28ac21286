//! Server-rendered admin pages
//!
//! Markup is minimal; each handler puts the page guard in front of one
//! admin page. Failures redirect instead of rendering.

use crate::auth::guard::api::request_context;
use crate::auth::guard::page::Redirect;
use crate::auth::identity::Identity;
use crate::auth::rbac::Permission;
use crate::server::state::AppState;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};

/// Configure page routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin", web::get().to(dashboard))
        .route("/admin/settings", web::get().to(settings))
        .route("/admin/audit-logs", web::get().to(audit_logs))
        .route("/unauthorized", web::get().to(unauthorized));
}

fn render(title: &str, user: Option<&Identity>, body: &str) -> HttpResponse {
    let signed_in = user
        .map(|u| format!("<p class=\"role\">Signed in as {}</p>", u.role))
        .unwrap_or_default();
    HttpResponse::Ok().content_type(ContentType::html()).body(format!(
        "<!doctype html><html><head><title>{title}</title></head>\
         <body><h1>{title}</h1>{signed_in}{body}</body></html>"
    ))
}

/// `/admin`, moderators and above
pub async fn dashboard(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, Redirect> {
    let ctx = request_context(&req);
    let user = state.pages.require_moderator(&ctx).await?;

    let mut links = String::from("<ul>");
    if state.pages.has_permission(&ctx, Permission::ViewAuditLogs).await {
        links.push_str("<li><a href=\"/admin/audit-logs\">Audit logs</a></li>");
    }
    if state.pages.has_permission(&ctx, Permission::EditSettings).await {
        links.push_str("<li><a href=\"/admin/settings\">Settings</a></li>");
    }
    links.push_str("</ul>");

    Ok(render("Dashboard", Some(&user), &links))
}

/// `/admin/settings`, requires `EDIT_SETTINGS`
pub async fn settings(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, Redirect> {
    let ctx = request_context(&req);
    let user = state
        .pages
        .require_permission(&ctx, Permission::EditSettings)
        .await?;

    Ok(render("Settings", Some(&user), ""))
}

/// `/admin/audit-logs`, requires `VIEW_AUDIT_LOGS`
pub async fn audit_logs(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, Redirect> {
    let ctx = request_context(&req);
    let user = state
        .pages
        .require_permission(&ctx, Permission::ViewAuditLogs)
        .await?;

    let export = if state.pages.has_permission(&ctx, Permission::ExportAuditLogs).await {
        "<button id=\"export\">Export</button>"
    } else {
        ""
    };

    Ok(render("Audit logs", Some(&user), export))
}

/// Landing page for forbidden page requests
pub async fn unauthorized(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let ctx = request_context(&req);
    let user = state.pages.current_user(&ctx).await;
    let mut response = render(
        "Unauthorized",
        user.as_ref(),
        "<p>You do not have access to that page.</p>",
    );
    *response.status_mut() = actix_web::http::StatusCode::FORBIDDEN;
    response
}
