//! Per-request context
//!
//! Built once at the HTTP boundary and passed explicitly to every guard call.
//! Nothing in here outlives the request.

use serde::Serialize;
use uuid::Uuid;

/// Request-scoped facts the guard layer needs
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestContext {
    /// Correlation id, echoed in logs
    pub request_id: String,
    /// Request path, used to build login redirects
    pub path: String,
    /// Raw session token from the `Authorization` header or session cookie
    #[serde(skip_serializing)]
    pub session_token: Option<String>,
    /// Client IP address
    pub client_ip: Option<String>,
    /// Client user agent
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Create a context for `path` with a fresh request id
    pub fn new<S: Into<String>>(path: S) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Attach a session token
    pub fn with_session_token<S: Into<String>>(mut self, token: S) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Attach client address and user agent
    pub fn with_client(mut self, ip: Option<String>, user_agent: Option<String>) -> Self {
        self.client_ip = ip;
        self.user_agent = user_agent;
        self
    }

    /// Whether the request carried any credentials at all
    pub fn has_credentials(&self) -> bool {
        self.session_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
