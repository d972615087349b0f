//! Request lifecycle endpoints, shared by the three request kinds
//!
//! The same handlers serve /equipment-requests, /equipment-returns, and
//! /change-requests; the kind arrives through a per-router Extension set
//! when the routers are nested.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        envelope::ApiResponse,
        request::{
            ApproveRequest, CreateRequest, Decision, RejectRequest, Request, RequestDetails,
            RequestKind, RequestQuery, RequestSummary, UpdateStatusRequest,
        },
        user::Permission,
    },
};

use super::AuthenticatedUser;

/// Create a request; it starts Pending with no approver
#[utoipa::path(
    post,
    path = "/{kind}",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created in pending state"),
        (status = 400, description = "Invalid line items or missing details"),
        (status = 404, description = "Requester not found")
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    Extension(kind): Extension<RequestKind>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<RequestDetails>>)> {
    let details = state
        .services
        .requests
        .create(kind, claims.user_id, payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            format!("{} submitted", kind.label()),
            details,
        )),
    ))
}

/// List the caller's own requests of this kind
#[utoipa::path(
    get,
    path = "/{kind}",
    tag = "requests",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's requests, all statuses")
    )
)]
pub async fn list_own(
    State(state): State<crate::AppState>,
    Extension(kind): Extension<RequestKind>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<RequestSummary>>>> {
    let requests = state
        .services
        .requests
        .list_for_requester(kind, claims.user_id)
        .await?;

    Ok(Json(ApiResponse::ok("Requests retrieved", requests)))
}

/// List all requests of this kind, optionally filtered by status
#[utoipa::path(
    get,
    path = "/{kind}/all",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(RequestQuery),
    responses(
        (status = 200, description = "All requests of the kind"),
        (status = 403, description = "Caller may not view all requests")
    )
)]
pub async fn list_all(
    State(state): State<crate::AppState>,
    Extension(kind): Extension<RequestKind>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<ApiResponse<Vec<RequestSummary>>>> {
    claims.require(Permission::ViewAllRequests)?;

    let requests = state.services.requests.list_all(kind, query.status).await?;

    Ok(Json(ApiResponse::ok("Requests retrieved", requests)))
}

/// Full request with line items and resolved names
#[utoipa::path(
    get,
    path = "/{kind}/{id}",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_details(
    State(state): State<crate::AppState>,
    Extension(kind): Extension<RequestKind>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<RequestDetails>>> {
    let details = state.services.requests.get_details(kind, id).await?;

    // Requesters may only inspect their own requests
    if details.request.requester_id != claims.user_id {
        claims.require(Permission::ViewAllRequests)?;
    }

    Ok(Json(ApiResponse::ok("Request details retrieved", details)))
}

/// Approve a pending request
#[utoipa::path(
    put,
    path = "/{kind}/{id}/approve",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = ApproveRequest,
    responses(
        (status = 200, description = "Request approved"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is not pending")
    )
)]
pub async fn approve(
    State(state): State<crate::AppState>,
    Extension(kind): Extension<RequestKind>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<ApproveRequest>,
) -> AppResult<Json<ApiResponse<Request>>> {
    claims.require(Permission::DecideRequests)?;

    let request = state
        .services
        .requests
        .decide(kind, id, Decision::Approve, claims.user_id, payload.signature)
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("{} approved", kind.label()),
        request,
    )))
}

/// Reject a pending request
#[utoipa::path(
    put,
    path = "/{kind}/{id}/reject",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Request rejected"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is not pending")
    )
)]
pub async fn reject(
    State(state): State<crate::AppState>,
    Extension(kind): Extension<RequestKind>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<RejectRequest>,
) -> AppResult<Json<ApiResponse<Request>>> {
    claims.require(Permission::DecideRequests)?;

    let request = state
        .services
        .requests
        .decide(kind, id, Decision::Reject, claims.user_id, payload.reason)
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("{} rejected", kind.label()),
        request,
    )))
}

/// Direct status update for the Return flow (Approved -> Returned)
#[utoipa::path(
    put,
    path = "/{kind}/{id}/status",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Transition not permitted")
    )
)]
pub async fn update_status(
    State(state): State<crate::AppState>,
    Extension(kind): Extension<RequestKind>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<Request>>> {
    claims.require(Permission::DecideRequests)?;

    let request = state
        .services
        .requests
        .update_status(kind, id, payload.status)
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("{} marked {}", kind.label(), request.status),
        request,
    )))
}
