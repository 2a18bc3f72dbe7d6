//! Role gate middleware.
//!
//! Runs after `require_auth`; the required role is the middleware state:
//! `from_fn_with_state(UserRole::Admin, require_role)`.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use storefront_auth::{Principal, RoleGate};
use storefront_entity::user::UserRole;

use crate::error::ApiResult;

/// Rejects the request with `403` unless the principal holds `required` or higher.
pub async fn require_role(
    State(required): State<UserRole>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let principal = request.extensions().get::<Principal>();
    RoleGate::new(required).check(principal).map_err(|e| {
        tracing::debug!(
            required = %required,
            subject = principal.map(|p| p.subject_id.as_str()).unwrap_or("-"),
            "Role check failed"
        );
        e
    })?;

    Ok(next.run(request).await)
}
