//! Configuration data models
//!
//! This module defines all configuration structures used by the console.

pub mod audit;
pub mod auth;
pub mod console;
pub mod logging;
pub mod server;
pub mod storage;

pub use audit::*;
pub use auth::*;
pub use console::*;
pub use logging::*;
pub use server::*;
pub use storage::*;

/// Default server host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default maximum database connections
pub fn default_max_connections() -> u32 {
    5
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_true() -> bool {
    true
}
