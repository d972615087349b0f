//! Department endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        department::{CreateDepartment, Department},
        envelope::ApiResponse,
        user::Permission,
    },
};

use super::{validate_payload, AuthenticatedUser};

/// List departments
#[utoipa::path(
    get,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Department list"))
)]
pub async fn list_departments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<Department>>>> {
    let departments = state.services.departments.list().await?;

    Ok(Json(ApiResponse::ok("Departments retrieved", departments)))
}

/// Create a department
#[utoipa::path(
    post,
    path = "/departments",
    tag = "departments",
    security(("bearer_auth" = [])),
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created"),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateDepartment>,
) -> AppResult<(StatusCode, Json<ApiResponse<Department>>)> {
    claims.require(Permission::ManageDepartments)?;
    validate_payload(&payload)?;

    let department = state.services.departments.create(&payload.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Department created", department)),
    ))
}

/// Rename a department
#[utoipa::path(
    put,
    path = "/departments/{id}",
    tag = "departments",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Department ID")),
    request_body = CreateDepartment,
    responses(
        (status = 200, description = "Department renamed"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn rename_department(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<CreateDepartment>,
) -> AppResult<Json<ApiResponse<Department>>> {
    claims.require(Permission::ManageDepartments)?;
    validate_payload(&payload)?;

    let department = state.services.departments.rename(id, &payload.name).await?;

    Ok(Json(ApiResponse::ok("Department renamed", department)))
}
