//! JWT token creation with a configured signing secret and TTL.

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::{EncodingKey, Header, encode};

use storefront_core::config::auth::AuthConfig;
use storefront_core::result::AppResult;
use storefront_entity::user::UserRole;

use super::claims::Claims;
use super::clock::Clock;
use super::error::TokenError;

/// Creates signed HS256 bearer tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Token lifetime.
    ttl: TimeDelta,
    /// Source of the issuance instant.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl", &self.ttl)
            .field("clock", &self.clock)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder reading time from `clock`.
    ///
    /// Fails when the configured lifetime is out of range.
    pub fn with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: config.token_ttl()?,
            clock,
        })
    }

    /// Signs a token for the given identity, valid for the configured TTL.
    pub fn issue(&self, subject_id: &str, email: &str, role: UserRole) -> Result<String, TokenError> {
        let now = self.clock.now();
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("token expiry is out of range".to_string()))?;

        let claims = Claims {
            sub: subject_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}
