//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use storefront_auth::jwt::{Clock, TokenManager};
use storefront_auth::password::PasswordHasher;
use storefront_core::config::AppConfig;
use storefront_core::result::AppResult;
use storefront_database::UserRepository;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Token issuance and verification
    pub token_manager: Arc<TokenManager>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// User account storage
    pub user_repo: Arc<dyn UserRepository>,
}

impl AppState {
    /// Wires the auth components from configuration using wall-clock time.
    ///
    /// Fails when the auth section cannot back a token manager.
    pub fn new(config: AppConfig, user_repo: Arc<dyn UserRepository>) -> AppResult<Self> {
        let token_manager = TokenManager::new(&config.auth)?;
        Ok(Self::assemble(config, token_manager, user_repo))
    }

    /// Same as [`AppState::new`] but token timestamps come from `clock`.
    pub fn with_clock(
        config: AppConfig,
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let token_manager = TokenManager::with_clock(&config.auth, clock)?;
        Ok(Self::assemble(config, token_manager, user_repo))
    }

    fn assemble(
        config: AppConfig,
        token_manager: TokenManager,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            token_manager: Arc::new(token_manager),
            password_hasher: Arc::new(PasswordHasher::new()),
            user_repo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::error::ErrorKind;
    use storefront_database::MemoryUserRepository;

    fn repo() -> Arc<dyn UserRepository> {
        Arc::new(MemoryUserRepository::new())
    }

    #[test]
    fn test_default_config_builds_state() {
        assert!(AppState::new(AppConfig::default(), repo()).is_ok());
    }

    #[test]
    fn test_oversized_expiration_is_a_startup_error() {
        let mut config = AppConfig::default();
        config.auth.jwt_expiration_minutes = u64::MAX / 2;

        let err = AppState::new(config, repo()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
