//! Bearer-token authentication middleware.
//!
//! Attach with `axum::middleware::from_fn_with_state(state, require_auth)` on
//! a route group. Verified claims are stored in the request extensions as a
//! [`Principal`] for the `AuthUser` extractor and the role gate.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use storefront_auth::Principal;
use storefront_core::error::AppError;

use crate::error::ApiResult;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the raw token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("Authorization header required"))?
        .to_str()
        .map_err(|_| AppError::unauthorized("Invalid authorization header format"))?;

    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))
}

/// Rejects the request with `401` unless it carries a valid bearer token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = bearer_token(request.headers())?;

    let claims = state.token_manager.verify(token).map_err(|e| {
        tracing::debug!(reason = %e, path = %request.uri().path(), "Bearer token rejected");
        e
    })?;

    request.extensions_mut().insert(Principal::from(claims));
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers("Bearer  abc ")).unwrap(), "abc");
    }

    #[test]
    fn test_missing_or_malformed_header() {
        assert!(bearer_token(&HeaderMap::new()).is_err());
        assert!(bearer_token(&headers("Token abc")).is_err());
        assert!(bearer_token(&headers("bearer abc")).is_err());
        assert!(bearer_token(&headers("Bearer")).is_err());
    }
}
