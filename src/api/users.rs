//! Staff administration endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        envelope::ApiResponse,
        user::{CreateUser, Permission, UpdateUser, User, UserQuery, UserShort},
    },
};

use super::{validate_payload, AuthenticatedUser};

/// List staff with optional name/department filters
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(UserQuery),
    responses(
        (status = 200, description = "Staff list"),
        (status = 403, description = "Caller may not manage staff")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<ApiResponse<Vec<UserShort>>>> {
    claims.require(Permission::ManageStaff)?;

    let users = state.services.users.list(&query).await?;

    Ok(Json(ApiResponse::ok("Users retrieved", users)))
}

/// Get one user
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<User>>> {
    claims.require(Permission::ManageStaff)?;

    let user = state.services.users.get(id).await?;

    Ok(Json(ApiResponse::ok("User retrieved", user)))
}

/// Create a staff member
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Invalid fields"),
        (status = 409, description = "Email or national ID already in use")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    claims.require(Permission::ManageStaff)?;
    validate_payload(&payload)?;

    let user = state.services.users.create(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User created", user)),
    ))
}

/// Update a staff member; omitted fields are left unchanged
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email or national ID already in use")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUser>,
) -> AppResult<Json<ApiResponse<User>>> {
    claims.require(Permission::ManageStaff)?;
    validate_payload(&payload)?;

    let user = state.services.users.update(id, payload).await?;

    Ok(Json(ApiResponse::ok("User updated", user)))
}

/// Soft-delete a staff member
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<()>>> {
    claims.require(Permission::ManageStaff)?;

    state.services.users.delete(id).await?;

    Ok(Json(ApiResponse::ok_empty("User deleted")))
}
