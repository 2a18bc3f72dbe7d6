//! Token failure taxonomy.

use thiserror::Error;

use storefront_core::error::AppError;

/// Why a token could not be issued or accepted.
///
/// Verification failures all surface as `401` at the HTTP boundary; the
/// variants exist so callers and logs can tell expiry apart from tampering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No token was presented.
    #[error("token is empty")]
    Missing,
    /// The token is not a well-formed JWT with the expected claims.
    #[error("token is malformed")]
    Malformed,
    /// The signature does not match the signing secret.
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The token is past its expiration instant.
    #[error("token has expired")]
    Expired,
    /// Signing a new token failed.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    /// Whether this is the expiry-class failure.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Malformed,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::unauthorized("Token has expired"),
            TokenError::Signing(_) => AppError::with_source(
                storefront_core::ErrorKind::Internal,
                "Failed to generate token",
                err,
            ),
            TokenError::Missing | TokenError::Malformed | TokenError::InvalidSignature => {
                AppError::unauthorized("Invalid token")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ErrorKind;

    #[test]
    fn test_verification_failures_map_to_unauthorized() {
        for err in [
            TokenError::Missing,
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::Expired,
        ] {
            assert_eq!(AppError::from(err).kind, ErrorKind::Unauthorized);
        }
    }

    #[test]
    fn test_signing_failure_is_internal_without_detail() {
        let app = AppError::from(TokenError::Signing("key rejected".to_string()));
        assert_eq!(app.kind, ErrorKind::Internal);
        assert!(!app.message.contains("key rejected"));
    }
}
