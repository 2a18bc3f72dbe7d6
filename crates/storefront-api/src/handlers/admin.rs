//! Admin-only handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{DashboardData, DashboardResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardResponse>> {
    let total_users = state.user_repo.count().await?;

    Ok(Json(DashboardResponse {
        message: "Welcome to Admin Dashboard".to_string(),
        data: DashboardData {
            total_users,
            requested_by: auth.email.clone(),
        },
    }))
}
