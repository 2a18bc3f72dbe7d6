//! # storefront-api
//!
//! HTTP API layer for the storefront built on Axum.
//!
//! Provides the auth endpoints, the bearer-token middleware and role gate,
//! request logging, CORS, extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
