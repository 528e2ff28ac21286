//! Tests for the guard layer

#[cfg(test)]
mod tests {
    use crate::auth::guard::api::{require_api_permission, require_api_role};
    use crate::auth::guard::page::PageGuard;
    use crate::auth::guard::view::{
        AccessGate, AdminOnly, CurrentUserResponse, ModeratorOnly, PermissionGuard, UserState,
        access_channel,
    };
    use crate::auth::guard::{Decision, Guard, GuardError, Requirement, evaluate};
    use crate::auth::identity::{
        AccountStatus, Identity, IdentityResolver, MemoryRoleStore, MockSessionProvider,
        RoleAssignment, Session,
    };
    use crate::auth::rbac::{Permission, Role};
    use crate::config::AuthConfig;
    use crate::core::RequestContext;
    use crate::utils::error::ConsoleError;
    use actix_web::test::TestRequest;
    use actix_web::{HttpMessage, web};
    use std::sync::Arc;
    use uuid::Uuid;

    /// Guard whose session provider yields a caller with `role`/`status`,
    /// or no session at all
    fn guard_for(caller: Option<(Role, AccountStatus)>) -> Guard {
        let store = Arc::new(MemoryRoleStore::new());
        let session = caller.map(|(role, status)| {
            let user_id = Uuid::new_v4();
            store.insert(
                RoleAssignment::new(user_id, "caller@example.com", role).with_status(status),
            );
            Session {
                user_id,
                email: "caller@example.com".to_string(),
            }
        });

        let mut provider = MockSessionProvider::new();
        provider
            .expect_current_session()
            .returning(move |_| Ok(session.clone()));

        Guard::new(IdentityResolver::new(Arc::new(provider), store))
    }

    fn active(role: Role) -> Option<(Role, AccountStatus)> {
        Some((role, AccountStatus::Active))
    }

    fn ctx() -> RequestContext {
        RequestContext::new("/admin/settings")
    }

    // ==================== Pure Evaluation ====================

    #[test]
    fn test_evaluate_without_identity_is_unauthenticated() {
        for requirement in [
            Requirement::Authenticated,
            Requirement::Permission(Permission::ViewDashboard),
            Requirement::MinimumRole(Role::User),
        ] {
            assert_eq!(evaluate(None, requirement), Decision::DenyUnauthenticated);
        }
    }

    #[test]
    fn test_evaluate_inactive_account_is_forbidden() {
        let identity = Identity::new(Uuid::new_v4(), "x@example.com", Role::Admin)
            .with_status(AccountStatus::Suspended);
        assert_eq!(
            evaluate(Some(&identity), Requirement::Authenticated),
            Decision::DenyForbidden("Account is suspended".to_string())
        );
    }

    #[test]
    fn test_evaluate_minimum_role() {
        let moderator = Identity::new(Uuid::new_v4(), "m@example.com", Role::Moderator);
        assert!(evaluate(Some(&moderator), Requirement::MinimumRole(Role::Moderator)).is_allowed());
        assert_eq!(
            evaluate(Some(&moderator), Requirement::MinimumRole(Role::Admin)),
            Decision::DenyForbidden("Requires admin role".to_string())
        );
    }

    // ==================== Guard ====================

    #[tokio::test]
    async fn test_require_permission_without_identity_is_unauthenticated() {
        let guard = guard_for(None);
        for permission in Permission::ALL {
            assert_eq!(
                guard.require_permission(&ctx(), permission).await,
                Err(GuardError::Unauthenticated)
            );
        }
    }

    #[tokio::test]
    async fn test_require_permission_user_lacking_permission_is_forbidden() {
        let guard = guard_for(active(Role::User));
        let result = guard.require_permission(&ctx(), Permission::ViewUsers).await;
        assert!(matches!(result, Err(GuardError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_moderator_scenarios() {
        let guard = guard_for(active(Role::Moderator));

        let identity = guard
            .require_permission(&ctx(), Permission::ViewAuditLogs)
            .await
            .unwrap();
        assert_eq!(identity.role, Role::Moderator);

        let denied = guard.require_permission(&ctx(), Permission::EditSettings).await;
        assert_eq!(
            denied,
            Err(GuardError::forbidden("Missing permission: EDIT_SETTINGS"))
        );
    }

    #[tokio::test]
    async fn test_require_admin_without_session_is_unauthenticated() {
        let guard = guard_for(None);
        assert_eq!(guard.require_admin(&ctx()).await, Err(GuardError::Unauthenticated));
        assert_eq!(guard.require_moderator(&ctx()).await, Err(GuardError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_admin_may_manage_roles() {
        let guard = guard_for(active(Role::Admin));
        assert!(guard.require_admin(&ctx()).await.is_ok());
        assert!(
            guard
                .require_permission(&ctx(), Permission::ManageUserRoles)
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_has_permission_is_total() {
        assert!(!guard_for(None).has_permission(&ctx(), Permission::ViewDashboard).await);
        assert!(!guard_for(active(Role::User)).has_permission(&ctx(), Permission::EditSettings).await);
        assert!(guard_for(active(Role::User)).has_permission(&ctx(), Permission::ViewDashboard).await);
        assert!(
            !guard_for(Some((Role::Admin, AccountStatus::Inactive)))
                .has_permission(&ctx(), Permission::ViewDashboard)
                .await
        );
    }

    #[tokio::test]
    async fn test_resolution_failure_denies() {
        let mut provider = MockSessionProvider::new();
        provider
            .expect_current_session()
            .returning(|_| Err(ConsoleError::internal("auth provider unreachable")));
        let guard = Guard::new(IdentityResolver::new(
            Arc::new(provider),
            Arc::new(MemoryRoleStore::new()),
        ));

        assert!(guard.current_user(&ctx()).await.is_none());
        assert_eq!(guard.require_admin(&ctx()).await, Err(GuardError::Unauthenticated));
        assert!(!guard.has_permission(&ctx(), Permission::ViewDashboard).await);
    }

    #[tokio::test]
    async fn test_current_user_includes_inactive_accounts() {
        let guard = guard_for(Some((Role::User, AccountStatus::Pending)));
        let user = guard.current_user(&ctx()).await.unwrap();
        assert_eq!(user.status, AccountStatus::Pending);
    }

    // ==================== Page Adapter ====================

    fn page_guard(caller: Option<(Role, AccountStatus)>) -> PageGuard {
        PageGuard::new(guard_for(caller), &AuthConfig::default())
    }

    #[tokio::test]
    async fn test_page_redirects_anonymous_to_login() {
        let ctx = RequestContext::new("/admin/audit-logs?page=2");
        let redirect = page_guard(None)
            .require_permission(&ctx, Permission::ViewAuditLogs)
            .await
            .unwrap_err();
        assert_eq!(
            redirect.location(),
            "/login?next=%2Fadmin%2Faudit-logs%3Fpage%3D2"
        );
    }

    #[tokio::test]
    async fn test_page_redirects_forbidden_to_unauthorized() {
        let redirect = page_guard(active(Role::Moderator))
            .require_permission(&ctx(), Permission::EditSettings)
            .await
            .unwrap_err();
        assert_eq!(redirect.location(), "/unauthorized");

        let redirect = page_guard(active(Role::User))
            .require_moderator(&ctx())
            .await
            .unwrap_err();
        assert_eq!(redirect.location(), "/unauthorized");
    }

    #[tokio::test]
    async fn test_page_allows_admin() {
        let identity = page_guard(active(Role::Admin)).require_admin(&ctx()).await.unwrap();
        assert_eq!(identity.role, Role::Admin);
    }

    #[test]
    fn test_redirect_response_has_location() {
        use actix_web::ResponseError;
        let redirect = crate::auth::guard::page::Redirect::to("/login?next=%2F");
        let response = redirect.error_response();
        assert_eq!(response.status(), actix_web::http::StatusCode::FOUND);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/login?next=%2F"
        );
    }

    // ==================== API Adapter ====================

    fn api_request(guard: Guard) -> actix_web::HttpRequest {
        let req = TestRequest::get()
            .uri("/api/admin/users")
            .app_data(web::Data::new(guard))
            .to_http_request();
        req.extensions_mut().insert(RequestContext::new("/api/admin/users"));
        req
    }

    #[actix_web::test]
    async fn test_api_role_maps_to_console_errors() {
        let anonymous = require_api_role(&api_request(guard_for(None)), Role::Moderator).await;
        assert!(matches!(anonymous, Err(ConsoleError::Unauthenticated(_))));

        let user = require_api_role(&api_request(guard_for(active(Role::User))), Role::Moderator).await;
        assert!(matches!(user, Err(ConsoleError::Forbidden(_))));

        let moderator =
            require_api_role(&api_request(guard_for(active(Role::Moderator))), Role::Moderator).await;
        assert!(moderator.is_ok());
    }

    #[actix_web::test]
    async fn test_api_permission() {
        let req = api_request(guard_for(active(Role::Moderator)));
        let result = require_api_permission(&req, Permission::ManageUserRoles).await;
        assert!(matches!(result, Err(ConsoleError::Forbidden(msg)) if msg.contains("MANAGE_USER_ROLES")));
    }

    #[actix_web::test]
    async fn test_api_without_guard_is_internal_error() {
        let req = TestRequest::get().to_http_request();
        let result = require_api_role(&req, Role::User).await;
        assert!(matches!(result, Err(ConsoleError::Internal(_))));
    }

    // ==================== View Adapter ====================

    fn loaded(role: Role) -> UserState {
        UserState::loaded(Some(Identity::new(Uuid::new_v4(), "v@example.com", role)))
    }

    #[test]
    fn test_user_state_flags() {
        let admin = loaded(Role::Admin);
        assert!(admin.is_admin());
        assert!(admin.is_moderator());
        assert!(admin.has_permission(Permission::EditSettings));

        let moderator = loaded(Role::Moderator);
        assert!(!moderator.is_admin());
        assert!(moderator.is_moderator());
        assert!(moderator.has_permission(Permission::ViewAuditLogs));

        let anonymous = UserState::loaded(None);
        assert!(!anonymous.is_moderator());
        assert!(!anonymous.has_permission(Permission::ViewDashboard));
    }

    #[test]
    fn test_loading_and_error_states_deny() {
        let mut state = loaded(Role::Admin);
        state.loading = true;
        assert!(!state.is_admin());

        assert!(!UserState::failed("network error").has_permission(Permission::ViewDashboard));
    }

    #[test]
    fn test_gates_choose_children_or_fallback() {
        let moderator = loaded(Role::Moderator);

        assert_eq!(ModeratorOnly.render(&moderator, || "panel", || "hidden"), "panel");
        assert_eq!(AdminOnly.render(&moderator, || "panel", || "hidden"), "hidden");
        assert_eq!(
            PermissionGuard(Permission::CreateAgents).render(&moderator, || 1, || 0),
            1
        );
        assert_eq!(
            PermissionGuard(Permission::DeleteAgents).render(&moderator, || 1, || 0),
            0
        );
        assert_eq!(
            AdminOnly.render(&UserState::loading(), || "panel", || "spinner"),
            "spinner"
        );
    }

    #[tokio::test]
    async fn test_access_watch_reevaluates_on_change() {
        let (publisher, mut watch) = access_channel();
        assert!(watch.current().loading);
        assert!(!AdminOnly.render(&watch.current(), || true, || false));

        publisher.resolve(Ok(Some(Identity::new(Uuid::new_v4(), "a@example.com", Role::Admin))));
        let state = watch.changed().await.unwrap();
        assert!(AdminOnly.render(&state, || true, || false));

        publisher.resolve(Err("session expired".to_string()));
        let state = watch.changed().await.unwrap();
        assert_eq!(state.error.as_deref(), Some("session expired"));
        assert!(!state.is_admin());

        drop(publisher);
        assert!(watch.changed().await.is_none());
    }

    #[tokio::test]
    async fn test_publisher_refresh_uses_guard() {
        let guard = guard_for(active(Role::Moderator));
        let (publisher, watch) = access_channel();
        publisher.refresh(&guard, &ctx()).await;
        let state = watch.current();
        assert!(!state.loading);
        assert!(state.is_moderator());
    }

    #[test]
    fn test_current_user_response() {
        let identity = Identity::new(Uuid::new_v4(), "u@example.com", Role::User);
        let response = CurrentUserResponse::from_identity(Some(identity.clone()));
        assert_eq!(response.permissions.len(), 5);
        assert!(!response.is_moderator);

        let state = UserState::from(response);
        assert_eq!(state.user, Some(identity));

        let anonymous = CurrentUserResponse::from_identity(None);
        assert!(anonymous.permissions.is_empty());
        assert!(!anonymous.is_admin);
    }
}
