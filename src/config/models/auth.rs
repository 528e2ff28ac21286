//! Authentication configuration

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Upper bound on session lifetime, 30 days in seconds
const MAX_JWT_EXPIRATION: u64 = 30 * 24 * 60 * 60;

/// Authentication and session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the session provider
    pub jwt_secret: String,
    /// Expected `iss` claim
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    /// Expected `aud` claim
    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,
    /// Lifetime of issued session tokens in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// Cookie carrying the session token for browser requests
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Redirect target for unauthenticated page requests
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Redirect target for forbidden page requests
    #[serde(default = "default_unauthorized_path")]
    pub unauthorized_path: String,
    /// Users granted `admin` at startup when they have no role row yet
    #[serde(default)]
    pub bootstrap_admins: Vec<BootstrapAdmin>,
}

/// Initial admin account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapAdmin {
    /// User ID issued by the authentication provider
    pub user_id: Uuid,
    /// Email address
    pub email: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            jwt_issuer: default_jwt_issuer(),
            jwt_audience: default_jwt_audience(),
            jwt_expiration: default_jwt_expiration(),
            session_cookie: default_session_cookie(),
            login_path: default_login_path(),
            unauthorized_path: default_unauthorized_path(),
            bootstrap_admins: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT secret must be at least 32 characters long for security".to_string());
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(
                "JWT secret must not use default values. Please generate a secure random secret."
                    .to_string(),
            );
        }

        if self.jwt_issuer.is_empty() || self.jwt_audience.is_empty() {
            return Err("JWT issuer and audience cannot be empty".to_string());
        }

        if self.jwt_expiration < 300 {
            return Err("JWT expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > MAX_JWT_EXPIRATION {
            return Err(format!(
                "JWT expiration cannot exceed 30 days ({} seconds)",
                MAX_JWT_EXPIRATION
            ));
        }

        if self.session_cookie.is_empty() {
            return Err("Session cookie name cannot be empty".to_string());
        }

        for path in [&self.login_path, &self.unauthorized_path] {
            if !path.starts_with('/') {
                return Err(format!("Redirect path must be absolute: {}", path));
            }
        }

        if let Some(admin) = self.bootstrap_admins.iter().find(|a| !a.email.contains('@')) {
            return Err(format!("Invalid bootstrap admin email: {}", admin.email));
        }

        Ok(())
    }
}

fn default_jwt_issuer() -> String {
    "console".to_string()
}

fn default_jwt_audience() -> String {
    "authenticated".to_string()
}

fn default_jwt_expiration() -> u64 {
    3600
}

fn default_session_cookie() -> String {
    "console-session".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_unauthorized_path() -> String {
    "/unauthorized".to_string()
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Warn about configuration that is fine for development only
pub fn warn_insecure_config(config: &AuthConfig) {
    if config.jwt_secret.chars().all(|c| c.is_ascii_lowercase()) {
        warn!("JWT secret is lowercase-only; use a random secret before deploying");
    }
}
