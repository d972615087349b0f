//! Request lifecycle models: one status machine shared by the three
//! request kinds, plus line-item types and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// The three request kinds sharing the lifecycle.
///
/// A kind contributes only its capability descriptor; the transition table
/// itself lives on [`RequestStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    EquipmentRequest,
    EquipmentReturn,
    ChangeRequest,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::EquipmentRequest => "equipment_request",
            RequestKind::EquipmentReturn => "equipment_return",
            RequestKind::ChangeRequest => "change_request",
        }
    }

    /// Human label used in messages and notification subjects
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::EquipmentRequest => "Equipment request",
            RequestKind::EquipmentReturn => "Equipment return",
            RequestKind::ChangeRequest => "Change request",
        }
    }

    /// Whether the kind has a post-approval Returned stage (equipment only)
    pub fn supports_return(&self) -> bool {
        matches!(
            self,
            RequestKind::EquipmentRequest | RequestKind::EquipmentReturn
        )
    }

    /// Whether requests of this kind carry line items
    pub fn carries_line_items(&self) -> bool {
        !matches!(self, RequestKind::ChangeRequest)
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equipment_request" => Ok(RequestKind::EquipmentRequest),
            "equipment_return" => Ok(RequestKind::EquipmentReturn),
            "change_request" => Ok(RequestKind::ChangeRequest),
            _ => Err(format!("Invalid request kind: {}", s)),
        }
    }
}

// Stored as TEXT; SQLx conversions delegate to String
impl sqlx::Type<Postgres> for RequestKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RequestKind {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RequestKind {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Workflow status shared by all request kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Returned,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Returned => "returned",
        }
    }

    /// Rejected and Returned admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Rejected | RequestStatus::Returned)
    }

    /// The single transition table. Transitions are one-directional and
    /// single-step; anything not listed here is rejected, never silently
    /// accepted.
    pub fn can_transition_to(&self, target: RequestStatus, kind: RequestKind) -> bool {
        match (self, target) {
            (RequestStatus::Pending, RequestStatus::Approved) => true,
            (RequestStatus::Pending, RequestStatus::Rejected) => true,
            (RequestStatus::Approved, RequestStatus::Returned) => kind.supports_return(),
            _ => false,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            "returned" => Ok(RequestStatus::Returned),
            _ => Err(format!("Invalid request status: {}", s)),
        }
    }
}

impl sqlx::Type<Postgres> for RequestStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for RequestStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for RequestStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <String as Encode<Postgres>>::encode(self.as_str().to_string(), buf)
    }
}

/// Approve/reject decision on a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn target_status(&self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Reject => RequestStatus::Rejected,
        }
    }
}

/// Request row, identical shape for all three kinds
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Request {
    pub id: i32,
    pub kind: RequestKind,
    pub requester_id: i32,
    pub department_id: Option<i32>,
    pub details: Option<String>,
    pub status: RequestStatus,
    pub approver_id: Option<i32>,
    pub decided_at: Option<DateTime<Utc>>,
    /// Signature text on approval, reason text on rejection
    pub decision_note: Option<String>,
    pub returned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Line item row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RequestLineItem {
    pub id: i32,
    pub request_id: i32,
    pub item_id: i32,
    pub quantity: i32,
}

/// Line item with the referenced item resolved, for detail views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LineItemDetails {
    pub id: i32,
    pub item_id: i32,
    pub item_name: String,
    pub category_name: String,
    pub quantity: i32,
}

/// Full request with line items and resolved names
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestDetails {
    #[serde(flatten)]
    pub request: Request,
    pub requester_name: String,
    pub approver_name: Option<String>,
    pub line_items: Vec<LineItemDetails>,
}

/// Request summary for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RequestSummary {
    pub id: i32,
    pub kind: RequestKind,
    pub requester_id: i32,
    pub requester_name: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

/// Line item as submitted by the requester
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLineItem {
    pub item_id: i32,
    pub quantity: i32,
}

/// Create request body
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[serde(default)]
    pub line_items: Vec<CreateLineItem>,
    /// Free-text description, used by change requests
    pub details: Option<String>,
}

/// Status filter for the administrator listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RequestQuery {
    pub status: Option<RequestStatus>,
}

/// Approve body
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveRequest {
    pub signature: Option<String>,
}

/// Reject body
#[derive(Debug, Deserialize, ToSchema)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

/// Direct status update body (Return flow)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: RequestStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Returned,
    ];

    #[test]
    fn pending_can_be_decided_either_way() {
        for kind in [
            RequestKind::EquipmentRequest,
            RequestKind::EquipmentReturn,
            RequestKind::ChangeRequest,
        ] {
            assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Approved, kind));
            assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected, kind));
        }
    }

    #[test]
    fn pending_cannot_skip_to_returned() {
        assert!(!RequestStatus::Pending
            .can_transition_to(RequestStatus::Returned, RequestKind::EquipmentRequest));
        assert!(!RequestStatus::Pending
            .can_transition_to(RequestStatus::Returned, RequestKind::EquipmentReturn));
    }

    #[test]
    fn returned_stage_is_equipment_only() {
        assert!(RequestStatus::Approved
            .can_transition_to(RequestStatus::Returned, RequestKind::EquipmentRequest));
        assert!(RequestStatus::Approved
            .can_transition_to(RequestStatus::Returned, RequestKind::EquipmentReturn));
        assert!(!RequestStatus::Approved
            .can_transition_to(RequestStatus::Returned, RequestKind::ChangeRequest));
    }

    #[test]
    fn terminal_states_admit_nothing() {
        for source in [RequestStatus::Rejected, RequestStatus::Returned] {
            assert!(source.is_terminal());
            for target in ALL_STATUSES {
                for kind in [
                    RequestKind::EquipmentRequest,
                    RequestKind::EquipmentReturn,
                    RequestKind::ChangeRequest,
                ] {
                    assert!(!source.can_transition_to(target, kind));
                }
            }
        }
    }

    #[test]
    fn approved_cannot_be_re_decided() {
        assert!(!RequestStatus::Approved
            .can_transition_to(RequestStatus::Rejected, RequestKind::EquipmentRequest));
        assert!(!RequestStatus::Approved
            .can_transition_to(RequestStatus::Approved, RequestKind::EquipmentRequest));
        assert!(!RequestStatus::Approved
            .can_transition_to(RequestStatus::Pending, RequestKind::EquipmentRequest));
    }

    #[test]
    fn decision_targets() {
        assert_eq!(Decision::Approve.target_status(), RequestStatus::Approved);
        assert_eq!(Decision::Reject.target_status(), RequestStatus::Rejected);
    }

    #[test]
    fn change_requests_have_no_line_items() {
        assert!(RequestKind::EquipmentRequest.carries_line_items());
        assert!(RequestKind::EquipmentReturn.carries_line_items());
        assert!(!RequestKind::ChangeRequest.carries_line_items());
    }
}
