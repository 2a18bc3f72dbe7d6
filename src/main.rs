//! Storefront Server: authentication core for the storefront backend.
//!
//! Loads configuration, initializes logging and hands off to the API crate.

use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, fmt};

use storefront_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let dotenv = match dotenv_outcome(dotenvy::dotenv()) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Failed to read .env file: {}", e);
            std::process::exit(1);
        }
    };

    let env = std::env::var("STOREFRONT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    match &dotenv {
        Some(path) => tracing::info!(path = %path.display(), "Loaded .env file"),
        None => tracing::debug!("No .env file found"),
    }
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = storefront_api::app::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// A missing `.env` is normal outside local development; anything else
/// (unreadable file, bad syntax) is reported.
fn dotenv_outcome(
    result: Result<PathBuf, dotenvy::Error>,
) -> Result<Option<PathBuf>, dotenvy::Error> {
    match result {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
