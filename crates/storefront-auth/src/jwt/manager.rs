//! Issue/verify facade over the encoder and decoder.

use std::sync::Arc;

use storefront_core::config::auth::AuthConfig;
use storefront_core::result::AppResult;
use storefront_entity::user::UserRole;

use super::claims::Claims;
use super::clock::{Clock, SystemClock};
use super::decoder::JwtDecoder;
use super::encoder::JwtEncoder;
use super::error::TokenError;

/// Issues and verifies bearer tokens under one shared secret.
///
/// Holds no mutable state; a single instance is shared by every request.
#[derive(Debug, Clone)]
pub struct TokenManager {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl TokenManager {
    /// Creates a manager from auth configuration using wall-clock time.
    ///
    /// Fails with a `Configuration` error for out-of-range lifetimes or leeway.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a manager whose encoder and decoder share `clock`.
    pub fn with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        Ok(Self {
            encoder: JwtEncoder::with_clock(config, Arc::clone(&clock))?,
            decoder: JwtDecoder::with_clock(config, clock)?,
        })
    }

    /// Signs a token carrying the given identity.
    pub fn issue(&self, subject_id: &str, email: &str, role: UserRole) -> Result<String, TokenError> {
        self.encoder.issue(subject_id, email, role)
    }

    /// Verifies a token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.decoder.verify(token)
    }
}
