//! JWT-backed session provider
//!
//! Verifies HS256 session tokens issued by the authentication provider. Only
//! `sub` and `email` are trusted; the role always comes from the role store.

use super::resolver::SessionProvider;
use super::types::Session;
use crate::config::AuthConfig;
use crate::core::RequestContext;
use crate::utils::error::{ConsoleError, Result};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Email address
    pub email: String,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
}

/// Session provider for HS256 bearer tokens
#[derive(Clone)]
pub struct JwtSessionProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    audience: String,
    expiration: u64,
}

impl std::fmt::Debug for JwtSessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionProvider")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration", &self.expiration)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtSessionProvider {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            expiration: config.jwt_expiration,
        }
    }

    /// Issue a session token for a user
    pub fn issue_token(&self, user_id: Uuid, email: &str) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ConsoleError::internal(format!("System time error: {}", e)))?
            .as_secs();
        let exp = now
            .checked_add(self.expiration)
            .ok_or_else(|| ConsoleError::internal("Session expiration overflows"))?;

        let claims = SessionClaims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?;
        debug!("Issued session token for user: {}", user_id);
        Ok(token)
    }

    /// Verify and decode a token
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn current_session(&self, ctx: &RequestContext) -> Result<Option<Session>> {
        let Some(token) = ctx.session_token.as_deref().filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        match self.verify_token(token) {
            Ok(claims) => Ok(Some(Session {
                user_id: claims.sub,
                email: claims.email,
            })),
            Err(e) => {
                // A bad token is an anonymous request, not a server failure
                warn!(request_id = %ctx.request_id, "Rejected session token: {}", e);
                Ok(None)
            }
        }
    }
}
