//! Shared utilities
//!
//! Error types and logging setup used throughout the console.

pub mod error;
pub mod logging;
