//! JWT token validation.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use storefront_core::config::auth::AuthConfig;
use storefront_core::result::AppResult;

use super::claims::Claims;
use super::clock::Clock;
use super::error::TokenError;

/// Validates bearer tokens against the shared secret.
///
/// Signature and structure are checked by `jsonwebtoken`; expiry is checked
/// here against the injected [`Clock`] so it can be driven in tests.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Signature and structure validation settings.
    validation: Validation,
    /// Tolerated clock skew in seconds.
    leeway_seconds: i64,
    /// Source of the verification instant.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .field("leeway_seconds", &self.leeway_seconds)
            .field("clock", &self.clock)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder reading time from `clock`.
    ///
    /// Fails when the configured leeway does not fit a signed second count.
    pub fn with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            leeway_seconds: config.leeway_seconds()?,
            clock,
        })
    }

    /// Decodes and validates a token string.
    ///
    /// Checks, in order:
    /// 1. Token is non-empty
    /// 2. Signature validity and claim structure
    /// 3. Expiration against the clock
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.is_expired_at(self.clock.now(), self.leeway_seconds) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
