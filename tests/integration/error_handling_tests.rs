//! Error rendering tests
//!
//! Every failure leaves the API as `{ "success": false, "error": ... }`.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use console_guard::{ConsoleError, GuardError};
    use serde_json::Value;

    async fn render(err: ConsoleError) -> (StatusCode, Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_guard_errors_map_to_401_and_403() {
        let (status, body) = render(GuardError::Unauthenticated.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Authentication required");

        let (status, body) = render(GuardError::forbidden("Requires admin role").into()).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Requires admin role");
    }

    #[actix_web::test]
    async fn test_domain_errors_keep_their_message() {
        let (status, body) = render(ConsoleError::conflict("last admin")).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "last admin");

        let (status, _) = render(ConsoleError::validation("bad")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = render(ConsoleError::not_found("user")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_internal_errors_are_generic() {
        let (status, body) = render(ConsoleError::internal("connection refused at 10.0.0.3")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An internal error occurred");
    }
}
