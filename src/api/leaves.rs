//! Leave request endpoints

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{
        envelope::ApiResponse,
        leave::{CreateLeave, LeaveRequest, LeaveRequestDetails},
        request::{Decision, RejectRequest, RequestQuery},
        user::Permission,
    },
};

use super::AuthenticatedUser;

fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("{} must be a date in YYYY-MM-DD format", field)))
}

/// Submit a leave request; multipart so a medical certificate can ride
/// along. Fields: leave_type, start_date, end_date, reason?, certificate?
#[utoipa::path(
    post,
    path = "/leave-requests",
    tag = "leaves",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Leave request created in pending state"),
        (status = 400, description = "Missing or malformed fields")
    )
)]
pub async fn create_leave(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<LeaveRequest>>)> {
    let mut leave_type: Option<String> = None;
    let mut start_date: Option<NaiveDate> = None;
    let mut end_date: Option<NaiveDate> = None;
    let mut reason: Option<String> = None;
    let mut certificate_path: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "leave_type" => {
                leave_type = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Invalid leave_type field: {}", e))
                })?)
            }
            "start_date" => {
                let text = field.text().await.map_err(|e| {
                    AppError::validation(format!("Invalid start_date field: {}", e))
                })?;
                start_date = Some(parse_date("start_date", &text)?);
            }
            "end_date" => {
                let text = field.text().await.map_err(|e| {
                    AppError::validation(format!("Invalid end_date field: {}", e))
                })?;
                end_date = Some(parse_date("end_date", &text)?);
            }
            "reason" => {
                reason = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Invalid reason field: {}", e))
                })?)
            }
            "certificate" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Invalid certificate upload: {}", e))
                })?;
                certificate_path = Some(
                    state
                        .services
                        .storage
                        .save("certificates", file_name.as_deref(), &bytes)
                        .await?,
                );
            }
            _ => {}
        }
    }

    let leave = CreateLeave {
        leave_type: leave_type
            .ok_or_else(|| AppError::validation("leave_type is required"))?,
        start_date: start_date
            .ok_or_else(|| AppError::validation("start_date is required"))?,
        end_date: end_date.ok_or_else(|| AppError::validation("end_date is required"))?,
        reason,
        certificate_path,
    };

    let created = state.services.leaves.create(claims.user_id, leave).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Leave request submitted", created)),
    ))
}

/// The caller's own leave requests
#[utoipa::path(
    get,
    path = "/leave-requests",
    tag = "leaves",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "The caller's leave requests"))
)]
pub async fn list_own_leaves(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<LeaveRequest>>>> {
    let leaves = state.services.leaves.list_own(claims.user_id).await?;

    Ok(Json(ApiResponse::ok("Leave requests retrieved", leaves)))
}

/// All leave requests, optionally filtered by status
#[utoipa::path(
    get,
    path = "/leave-requests/all",
    tag = "leaves",
    security(("bearer_auth" = [])),
    params(RequestQuery),
    responses(
        (status = 200, description = "All leave requests"),
        (status = 403, description = "Caller may not view all requests")
    )
)]
pub async fn list_all_leaves(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<ApiResponse<Vec<LeaveRequestDetails>>>> {
    claims.require(Permission::ViewAllRequests)?;

    let leaves = state.services.leaves.list_all(query.status).await?;

    Ok(Json(ApiResponse::ok("Leave requests retrieved", leaves)))
}

/// Approve a pending leave request
#[utoipa::path(
    put,
    path = "/leave-requests/{id}/approve",
    tag = "leaves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave approved"),
        (status = 409, description = "Leave is not pending")
    )
)]
pub async fn approve_leave(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<LeaveRequest>>> {
    claims.require(Permission::DecideRequests)?;

    let leave = state
        .services
        .leaves
        .decide(id, Decision::Approve, claims.user_id, None)
        .await?;

    Ok(Json(ApiResponse::ok("Leave request approved", leave)))
}

/// Reject a pending leave request
#[utoipa::path(
    put,
    path = "/leave-requests/{id}/reject",
    tag = "leaves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Leave request ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Leave rejected"),
        (status = 409, description = "Leave is not pending")
    )
)]
pub async fn reject_leave(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(payload): Json<RejectRequest>,
) -> AppResult<Json<ApiResponse<LeaveRequest>>> {
    claims.require(Permission::DecideRequests)?;

    let leave = state
        .services
        .leaves
        .decide(id, Decision::Reject, claims.user_id, payload.reason)
        .await?;

    Ok(Json(ApiResponse::ok("Leave request rejected", leave)))
}
