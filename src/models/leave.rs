//! Leave request model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::models::request::RequestStatus;

/// Leave request row; shares the Pending/Approved/Rejected machine, no
/// Returned stage
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveRequest {
    pub id: i32,
    pub user_id: i32,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    /// File-store reference for the medical certificate, when uploaded
    pub certificate_path: Option<String>,
    pub status: RequestStatus,
    pub approver_id: Option<i32>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decision_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Leave request joined with the requester name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveRequestDetails {
    pub id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub certificate_path: Option<String>,
    pub status: RequestStatus,
    pub approver_id: Option<i32>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decision_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Parsed multipart fields of a leave submission
#[derive(Debug, Clone)]
pub struct CreateLeave {
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub certificate_path: Option<String>,
}
