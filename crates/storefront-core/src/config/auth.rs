//! Authentication configuration.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Placeholder secret shipped in the defaults; never fit for production.
pub const DEFAULT_JWT_SECRET: &str = "default-secret-key";

/// Longest accepted token lifetime: ten years, in minutes.
pub const MAX_JWT_EXPIRATION_MINUTES: u64 = 10 * 365 * 24 * 60;

/// Token signing configuration.
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for HMAC-SHA256 token signatures.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Lifetime of an issued token, in minutes.
    #[serde(default = "default_expiration")]
    pub jwt_expiration_minutes: u64,
    /// Clock skew tolerated when checking expiration, in seconds.
    #[serde(default)]
    pub jwt_leeway_seconds: u64,
}

impl AuthConfig {
    /// Token lifetime as a chrono duration.
    ///
    /// Fails with a `Configuration` error instead of overflowing when the
    /// configured lifetime is out of range.
    pub fn token_ttl(&self) -> AppResult<TimeDelta> {
        if self.jwt_expiration_minutes > MAX_JWT_EXPIRATION_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_expiration_minutes must not exceed {MAX_JWT_EXPIRATION_MINUTES}"
            )));
        }

        i64::try_from(self.jwt_expiration_minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .ok_or_else(|| {
                AppError::configuration("auth.jwt_expiration_minutes is out of range")
            })
    }

    /// Tolerated clock skew in seconds, as a signed value.
    pub fn leeway_seconds(&self) -> AppResult<i64> {
        i64::try_from(self.jwt_leeway_seconds).map_err(|_| {
            AppError::configuration(format!(
                "auth.jwt_leeway_seconds must not exceed {}",
                i64::MAX
            ))
        })
    }

    /// Whether the placeholder secret is still in use.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    /// Checks the invariants the token manager relies on.
    pub fn validate(&self) -> AppResult<()> {
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.jwt_expiration_minutes == 0 {
            return Err(AppError::configuration(
                "auth.jwt_expiration_minutes must be greater than zero",
            ));
        }
        self.token_ttl()?;
        self.leeway_seconds()?;
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_expiration_minutes: default_expiration(),
            jwt_leeway_seconds: 0,
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_expiration() -> u64 {
    24 * 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn with_expiration(minutes: u64) -> AuthConfig {
        AuthConfig {
            jwt_expiration_minutes: minutes,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_default_ttl_is_one_day() {
        assert_eq!(AuthConfig::default().token_ttl().unwrap(), TimeDelta::days(1));
        assert!(AuthConfig::default().validate().is_ok());
    }

    #[test]
    fn test_upper_bound_expiration_is_accepted() {
        let config = with_expiration(MAX_JWT_EXPIRATION_MINUTES);
        assert!(config.validate().is_ok());
        assert_eq!(config.token_ttl().unwrap(), TimeDelta::days(3650));
    }

    #[test]
    fn test_oversized_expiration_is_rejected() {
        for minutes in [
            MAX_JWT_EXPIRATION_MINUTES + 1,
            1_000_000_000_000,
            u64::MAX / 2,
            u64::MAX,
        ] {
            let config = with_expiration(minutes);
            assert_eq!(
                config.validate().unwrap_err().kind,
                ErrorKind::Configuration,
                "minutes: {minutes}"
            );
            assert_eq!(config.token_ttl().unwrap_err().kind, ErrorKind::Configuration);
        }
    }

    #[test]
    fn test_leeway_beyond_signed_range_is_rejected() {
        let mut config = AuthConfig::default();
        config.jwt_leeway_seconds = i64::MAX as u64;
        assert_eq!(config.leeway_seconds().unwrap(), i64::MAX);
        assert!(config.validate().is_ok());

        config.jwt_leeway_seconds = i64::MAX as u64 + 1;
        assert_eq!(
            config.validate().unwrap_err().kind,
            ErrorKind::Configuration
        );
        assert!(config.leeway_seconds().is_err());
    }
}
