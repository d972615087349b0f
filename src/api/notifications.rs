//! Notification endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{envelope::ApiResponse, notification::Notification},
};

use super::AuthenticatedUser;

/// The caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "The caller's notifications"))
)]
pub async fn list_notifications(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<Notification>>>> {
    let notifications = state
        .services
        .notifications
        .list_own(claims.user_id)
        .await?;

    Ok(Json(ApiResponse::ok("Notifications retrieved", notifications)))
}

/// Mark one of the caller's notifications as read
#[utoipa::path(
    put,
    path = "/notifications/{id}/read",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification marked read"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .services
        .notifications
        .mark_read(claims.user_id, id)
        .await?;

    Ok(Json(ApiResponse::ok_empty("Notification marked read")))
}
