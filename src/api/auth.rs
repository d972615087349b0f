//! Authentication endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        envelope::ApiResponse,
        user::{LoginRequest, User},
    },
};

use super::{validate_payload, AuthenticatedUser};

/// Login response payload
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user: User,
}

/// Authenticate with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated; token returned"),
        (status = 401, description = "Invalid credentials or blocked account")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    validate_payload(&payload)?;

    let (token, user) = state
        .services
        .auth
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Login successful",
        LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            user,
        },
    )))
}

/// Current authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = state.services.users.get(claims.user_id).await?;

    Ok(Json(ApiResponse::ok("Current user retrieved", user)))
}
