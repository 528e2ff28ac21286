//! Core request and domain types
//!
//! Per-request context and the user-management operations that sit on top of
//! the guard layer.

pub mod context;
pub mod user_management;

pub use context::RequestContext;
