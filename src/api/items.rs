//! Equipment catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        envelope::ApiResponse,
        item::{
            CreateCategory, CreateItem, EquipmentCategory, Item, ItemPublic, ItemWithCategory,
            UpdateItem,
        },
        user::Permission,
    },
};

use super::{validate_payload, AuthenticatedUser};

/// List equipment categories
#[utoipa::path(
    get,
    path = "/categories",
    tag = "catalog",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Category list"))
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<EquipmentCategory>>>> {
    let categories = state.services.catalog.list_categories().await?;

    Ok(Json(ApiResponse::ok("Categories retrieved", categories)))
}

/// Create an equipment category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "catalog",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created"),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<ApiResponse<EquipmentCategory>>)> {
    claims.require(Permission::ManageCatalog)?;
    validate_payload(&payload)?;

    let category = state.services.catalog.create_category(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Category created", category)),
    ))
}

/// Items offered to requesters; fixed assets show quantity 1
#[utoipa::path(
    get,
    path = "/items",
    tag = "catalog",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Approved items with display quantities"))
)]
pub async fn list_available_items(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<ItemPublic>>>> {
    let items = state.services.catalog.list_available().await?;

    Ok(Json(ApiResponse::ok("Items retrieved", items)))
}

/// Full catalog including unapproved items (admin)
#[utoipa::path(
    get,
    path = "/items/all",
    tag = "catalog",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Full catalog"),
        (status = 403, description = "Caller may not manage the catalog")
    )
)]
pub async fn list_all_items(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<ItemWithCategory>>>> {
    claims.require(Permission::ManageCatalog)?;

    let items = state.services.catalog.list_items().await?;

    Ok(Json(ApiResponse::ok("Items retrieved", items)))
}

/// Create a catalog item
#[utoipa::path(
    post,
    path = "/items",
    tag = "catalog",
    security(("bearer_auth" = [])),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<ApiResponse<Item>>)> {
    claims.require(Permission::ManageCatalog)?;
    validate_payload(&payload)?;

    let item = state.services.catalog.create_item(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Item created", item)),
    ))
}

/// Update a catalog item
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "catalog",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Item ID")),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateItem>,
) -> AppResult<Json<ApiResponse<Item>>> {
    claims.require(Permission::ManageCatalog)?;
    validate_payload(&payload)?;

    let item = state.services.catalog.update_item(id, payload).await?;

    Ok(Json(ApiResponse::ok("Item updated", item)))
}
