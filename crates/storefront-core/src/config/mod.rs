//! Application configuration schemas.
//!
//! Configuration is layered with the `config` crate: optional TOML files
//! (`config/default.toml`, then `config/{env}.toml`), then variables
//! prefixed with `STOREFRONT__` using `__` as the section separator.
//! The flat legacy variables `PORT`, `JWT_SECRET`, `JWT_EXPIRATION` and
//! `WRITE_TIMEOUT` are applied as overrides and win over every other source.
//! Durations use the `humantime` syntax (`24h`, `90m`, `10s`).

pub mod app;
pub mod auth;
pub mod logging;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;
use crate::result::AppResult;

pub use self::app::CorsConfig;

/// Snapshot of environment variables the loader reads from.
pub type EnvVars = config::Map<String, String>;

/// Source builder the layered loader starts from.
pub type SourceBuilder = config::ConfigBuilder<config::builder::DefaultState>;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Token signing and password settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load the layered configuration for the given environment name.
    pub fn load(env: &str) -> AppResult<Self> {
        let files = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));

        Self::layered(files, &std::env::vars().collect())
    }

    /// Layer `STOREFRONT__*` variables and the legacy overrides from `vars`
    /// on top of `files`, then build and validate.
    pub fn layered(files: SourceBuilder, vars: &EnvVars) -> AppResult<Self> {
        let builder = files.add_source(
            config::Environment::with_prefix("STOREFRONT")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        Self::from_builder(apply_legacy_overrides(builder, vars)?)
    }

    /// Build and validate a configuration from an assembled source builder.
    pub fn from_builder(builder: SourceBuilder) -> AppResult<Self> {
        let config = builder
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject configurations the server cannot safely start with.
    pub fn validate(&self) -> AppResult<()> {
        self.server.validate()?;
        self.auth.validate()
    }
}

/// Empty values count as unset.
fn legacy_var<'a>(vars: &'a EnvVars, key: &str) -> Option<&'a str> {
    vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn parse_duration(key: &str, value: &str) -> AppResult<Duration> {
    humantime::parse_duration(value)
        .map_err(|e| AppError::configuration(format!("{key} is not a valid duration: {e}")))
}

fn apply_legacy_overrides(mut builder: SourceBuilder, vars: &EnvVars) -> AppResult<SourceBuilder> {
    if let Some(port) = legacy_var(vars, "PORT") {
        let port: u16 = port
            .parse()
            .map_err(|_| AppError::configuration(format!("PORT is not a valid port: {port}")))?;
        builder = builder.set_override("server.port", i64::from(port))?;
    }

    if let Some(secret) = legacy_var(vars, "JWT_SECRET") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }

    if let Some(value) = legacy_var(vars, "JWT_EXPIRATION") {
        let secs = parse_duration("JWT_EXPIRATION", value)?.as_secs();
        if secs % 60 != 0 {
            return Err(AppError::configuration(format!(
                "JWT_EXPIRATION must be a whole number of minutes: {value}"
            )));
        }
        let minutes = i64::try_from(secs / 60)
            .map_err(|_| AppError::configuration("JWT_EXPIRATION is out of range"))?;
        builder = builder.set_override("auth.jwt_expiration_minutes", minutes)?;
    }

    if let Some(value) = legacy_var(vars, "WRITE_TIMEOUT") {
        let secs = i64::try_from(parse_duration("WRITE_TIMEOUT", value)?.as_secs())
            .map_err(|_| AppError::configuration("WRITE_TIMEOUT is out of range"))?;
        builder = builder.set_override("server.request_timeout_seconds", secs)?;
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(toml: &str) -> SourceBuilder {
        config::Config::builder().add_source(config::File::from_str(toml, config::FileFormat::Toml))
    }

    fn from_toml(toml: &str) -> AppResult<AppConfig> {
        AppConfig::from_builder(file(toml))
    }

    fn vars(pairs: &[(&str, &str)]) -> EnvVars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const SECRET_FILE: &str = r#"
        [server]
        port = 9000

        [auth]
        jwt_secret = "from-file"
    "#;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.jwt_expiration_minutes, 24 * 60);
        assert_eq!(config.auth.jwt_leeway_seconds, 0);
        assert_eq!(config.logging.format, "json");
        assert!(config.auth.uses_default_secret());
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 9000

            [auth]
            jwt_secret = "s3cret"
            jwt_expiration_minutes = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.auth.token_ttl().unwrap(), chrono::TimeDelta::hours(1));
        assert!(!config.auth.uses_default_secret());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let err = from_toml(
            r#"
            [auth]
            jwt_secret = ""
            "#,
        )
        .unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Configuration);
    }

    #[test]
    fn test_zero_expiration_is_rejected() {
        let err = from_toml(
            r#"
            [auth]
            jwt_expiration_minutes = 0
            "#,
        )
        .unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Configuration);
    }

    #[test]
    fn test_file_value_applies_without_env() {
        let config = AppConfig::layered(file(SECRET_FILE), &vars(&[])).unwrap();
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_prefixed_env_beats_file() {
        let config = AppConfig::layered(
            file(SECRET_FILE),
            &vars(&[
                ("STOREFRONT__AUTH__JWT_SECRET", "from-prefixed-env"),
                ("STOREFRONT__SERVER__PORT", "9100"),
            ]),
        )
        .unwrap();

        assert_eq!(config.auth.jwt_secret, "from-prefixed-env");
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_legacy_vars_beat_prefixed_env_and_file() {
        let config = AppConfig::layered(
            file(SECRET_FILE),
            &vars(&[
                ("STOREFRONT__AUTH__JWT_SECRET", "from-prefixed-env"),
                ("STOREFRONT__SERVER__PORT", "9100"),
                ("JWT_SECRET", "from-legacy-env"),
                ("PORT", "9200"),
            ]),
        )
        .unwrap();

        assert_eq!(config.auth.jwt_secret, "from-legacy-env");
        assert_eq!(config.server.port, 9200);
    }

    #[test]
    fn test_empty_legacy_var_is_ignored() {
        let config = AppConfig::layered(
            file(SECRET_FILE),
            &vars(&[("JWT_SECRET", ""), ("PORT", "")]),
        )
        .unwrap();

        assert_eq!(config.auth.jwt_secret, "from-file");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_legacy_durations() {
        let config = AppConfig::layered(
            file(""),
            &vars(&[("JWT_EXPIRATION", "2h"), ("WRITE_TIMEOUT", "15s")]),
        )
        .unwrap();

        assert_eq!(config.auth.jwt_expiration_minutes, 120);
        assert_eq!(config.server.request_timeout_seconds, 15);

        let config =
            AppConfig::layered(file(""), &vars(&[("JWT_EXPIRATION", "1h 30m")])).unwrap();
        assert_eq!(config.auth.jwt_expiration_minutes, 90);
    }

    #[test]
    fn test_invalid_legacy_values_are_rejected() {
        for pairs in [
            [("JWT_EXPIRATION", "soon")],
            [("JWT_EXPIRATION", "90s")],
            [("JWT_EXPIRATION", "100000y")],
            [("WRITE_TIMEOUT", "fast")],
            [("PORT", "http")],
        ] {
            let err = AppConfig::layered(file(""), &vars(&pairs)).unwrap_err();
            assert_eq!(err.kind, crate::ErrorKind::Configuration, "{pairs:?}");
        }
    }

    #[test]
    fn test_zero_request_timeout_is_rejected() {
        let err = from_toml(
            r#"
            [server]
            request_timeout_seconds = 0
            "#,
        )
        .unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Configuration);
    }
}
