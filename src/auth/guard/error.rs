//! Guard failure kinds

use crate::utils::error::ConsoleError;
use thiserror::Error;

/// Why a guard denied access
///
/// The two kinds stay distinct all the way to the caller: pages redirect them
/// to different targets, APIs answer 401 vs 403.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// No resolvable identity
    #[error("Authentication required")]
    Unauthenticated,

    /// Identity resolved but the requirement is not met
    #[error("{reason}")]
    Forbidden { reason: String },
}

impl GuardError {
    pub fn forbidden<S: Into<String>>(reason: S) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}

impl From<GuardError> for ConsoleError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Unauthenticated => ConsoleError::unauthenticated(err.to_string()),
            GuardError::Forbidden { reason } => ConsoleError::forbidden(reason),
        }
    }
}
