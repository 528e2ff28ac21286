//! HTTP middleware implementations
//!
//! - Request context construction (request id, session token, client info)
//! - Role gating for whole scopes

mod helpers;
mod request_context;
mod role_gate;


pub use helpers::{client_ip, extract_session_token, request_id_from_headers};
pub use request_context::{RequestContextMiddleware, RequestContextMiddlewareService};
pub use role_gate::{RoleGate, RoleGateService};
