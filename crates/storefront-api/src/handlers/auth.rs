//! Auth handlers: register, login, profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_entity::user::{CreateUser, UserRole};

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{AuthResponse, LoginResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    if state.user_repo.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::conflict("User already exists").into());
    }

    let password_hash = state.password_hasher.hash_password(&req.password)?;
    let role = UserRole::from_requested(req.role.as_deref());

    let user = state
        .user_repo
        .create(CreateUser {
            email: req.email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            role,
        })
        .await?;

    let token = state
        .token_manager
        .issue(&user.id.to_string(), &user.email, user.role)?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // Unknown email and wrong password share one message and one Argon2 pass.
    let Some(user) = state.user_repo.find_by_email(&req.email).await? else {
        state.password_hasher.verify_decoy(&req.password);
        return Err(AppError::unauthorized("Invalid credentials").into());
    };

    if !state
        .password_hasher
        .verify_password(&req.password, &user.password_hash)
    {
        return Err(AppError::unauthorized("Invalid credentials").into());
    }

    if !user.can_login() {
        tracing::warn!(user_id = %user.id, "Login attempt on deactivated account");
        return Err(AppError::unauthorized("Account is deactivated").into());
    }

    let token = state
        .token_manager
        .issue(&user.id.to_string(), &user.email, user.role)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        role: user.role,
    }))
}

/// GET /api/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let id = Uuid::parse_str(&auth.subject_id)
        .map_err(|_| AppError::validation("Invalid user ID"))?;

    let user = state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(&user)))
}
