//! Error handling for the console
//!
//! This module defines the crate error type and its HTTP rendering.

mod helpers;
mod response;
mod types;

pub use response::ErrorEnvelope;
pub use types::{ConsoleError, Result};
