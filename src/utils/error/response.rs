//! HTTP response handling for errors

use super::types::ConsoleError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON body returned for every failed API call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

impl ResponseError for ConsoleError {
    fn status_code(&self) -> StatusCode {
        match self {
            ConsoleError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ConsoleError::Forbidden(_) => StatusCode::FORBIDDEN,
            ConsoleError::Validation(_) | ConsoleError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ConsoleError::NotFound(_) => StatusCode::NOT_FOUND,
            ConsoleError::Conflict(_) => StatusCode::CONFLICT,
            ConsoleError::Config(_)
            | ConsoleError::Database(_)
            | ConsoleError::Serialization(_)
            | ConsoleError::Yaml(_)
            | ConsoleError::Io(_)
            | ConsoleError::Jwt(_)
            | ConsoleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ConsoleError::Unauthenticated(msg)
            | ConsoleError::Forbidden(msg)
            | ConsoleError::Validation(msg)
            | ConsoleError::BadRequest(msg)
            | ConsoleError::NotFound(msg)
            | ConsoleError::Conflict(msg) => msg.clone(),
            other => {
                // Infrastructure details stay in the log
                error!(error = %other, "Request failed with internal error");
                "An internal error occurred".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorEnvelope::new(message))
    }
}
