//! Full application tests
//!
//! The real application on SQLite storage, driven over HTTP.

#[cfg(test)]
mod tests {
    use crate::common::{TestConsole, UserFactory};
    use actix_web::http::StatusCode;
    use actix_web::http::header::{AUTHORIZATION, LOCATION};
    use actix_web::test;
    use console_guard::Role;
    use console_guard::server::create_app;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_bootstrapped_admin_can_manage_roles() {
        let console = TestConsole::new().await;
        let db = console.state.database.clone().unwrap();
        let member = UserFactory::user();
        db.upsert_role_assignment(&member).await.unwrap();

        let app = test::init_service(create_app(console.state.clone())).await;

        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((AUTHORIZATION, console.admin_bearer()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["is_admin"], true);
        assert_eq!(body["data"]["permissions"].as_array().unwrap().len(), 24);

        let req = test::TestRequest::patch()
            .uri(&format!("/api/admin/users/{}", member.user_id))
            .insert_header((AUTHORIZATION, console.admin_bearer()))
            .set_json(json!({"role": "moderator", "status": "active"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["role"], "moderator");

        let stored = db.find_role_assignment(member.user_id).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Moderator);

        let audit = db.recent_audit_logs(5).await.unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].actor_id, console.admin.user_id);
        assert_eq!(audit[0].resource_id, Some(member.user_id.to_string()));
    }

    #[actix_web::test]
    async fn test_admins_keep_one_active_admin() {
        let console = TestConsole::new().await;
        let db = console.state.database.clone().unwrap();
        let second = UserFactory::admin();
        db.upsert_role_assignment(&second).await.unwrap();

        let app = test::init_service(create_app(console.state.clone())).await;
        let second_bearer = console.bearer(second.user_id, &second.email);

        // Two active admins: the second may deactivate the first
        let req = test::TestRequest::patch()
            .uri(&format!("/api/admin/users/{}", console.admin.user_id))
            .insert_header((AUTHORIZATION, second_bearer.clone()))
            .set_json(json!({"status": "inactive"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        // The deactivated admin is now locked out
        let req = test::TestRequest::get()
            .uri("/api/admin/users")
            .insert_header((AUTHORIZATION, console.admin_bearer()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        // The remaining admin cannot deactivate themself
        let req = test::TestRequest::patch()
            .uri(&format!("/api/admin/users/{}", second.user_id))
            .insert_header((AUTHORIZATION, second_bearer))
            .set_json(json!({"status": "inactive"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        assert_eq!(db.count_active_admins().await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn test_moderator_journey() {
        let console = TestConsole::new().await;
        let db = console.state.database.clone().unwrap();
        let moderator = UserFactory::moderator();
        db.upsert_role_assignment(&moderator).await.unwrap();
        let bearer = console.bearer(moderator.user_id, &moderator.email);

        let app = test::init_service(create_app(console.state.clone())).await;

        let req = test::TestRequest::get()
            .uri("/api/admin/users")
            .insert_header((AUTHORIZATION, bearer.clone()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header((AUTHORIZATION, bearer.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = String::from_utf8_lossy(&test::read_body(resp).await).to_string();
        assert!(html.contains("/admin/audit-logs"));
        assert!(!html.contains("/admin/settings"));

        let req = test::TestRequest::get()
            .uri("/admin/settings")
            .insert_header((AUTHORIZATION, bearer))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(LOCATION).unwrap(), "/unauthorized");
    }

    #[actix_web::test]
    async fn test_unknown_user_without_role_row_is_anonymous() {
        let console = TestConsole::new().await;
        let app = test::init_service(create_app(console.state.clone())).await;

        let stranger = uuid::Uuid::new_v4();
        let req = test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((AUTHORIZATION, console.bearer(stranger, "stranger@example.com")))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_health_reports_database() {
        let console = TestConsole::new().await;
        let app = test::init_service(create_app(console.state.clone())).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["database"], true);
        assert_eq!(body["data"]["version"], console_guard::VERSION);
    }
}
