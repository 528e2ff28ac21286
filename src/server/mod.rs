//! HTTP server implementation
//!
//! Routes, middleware, and the shared application state.

pub mod builder;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;


pub use builder::ServerBuilder;
pub use server::{ConsoleServer, create_app};
pub use state::AppState;
