//! Requests repository: persistence for the request lifecycle engine
//!
//! The decide/return paths are single conditional UPDATE statements so the
//! status read-check-write is atomic; of two racing decisions only one row
//! update can win.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::request::{
        LineItemDetails, Request, RequestDetails, RequestKind, RequestStatus, RequestSummary,
    },
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a request of the given kind by ID
    pub async fn get_by_id(&self, kind: RequestKind, id: i32) -> AppResult<Request> {
        sqlx::query_as::<_, Request>("SELECT * FROM requests WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind.label(), id)))
    }

    /// Persist a request and its line items as one unit
    pub async fn create(
        &self,
        kind: RequestKind,
        requester_id: i32,
        department_id: Option<i32>,
        details: Option<&str>,
        line_items: &[(i32, i32)],
    ) -> AppResult<Request> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, Request>(
            r#"
            INSERT INTO requests (kind, requester_id, department_id, details, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING *
            "#,
        )
        .bind(kind)
        .bind(requester_id)
        .bind(department_id)
        .bind(details)
        .fetch_one(&mut *tx)
        .await?;

        for (item_id, quantity) in line_items {
            sqlx::query(
                "INSERT INTO request_items (request_id, item_id, quantity) VALUES ($1, $2, $3)",
            )
            .bind(request.id)
            .bind(item_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(request)
    }

    /// Requests of one kind created by the given requester, newest first
    pub async fn list_for_requester(
        &self,
        kind: RequestKind,
        requester_id: i32,
    ) -> AppResult<Vec<RequestSummary>> {
        let requests = sqlx::query_as::<_, RequestSummary>(
            r#"
            SELECT r.id, r.kind, r.requester_id, u.full_name AS requester_name,
                   r.status, r.created_at, r.decided_at
            FROM requests r
            JOIN users u ON u.id = r.requester_id
            WHERE r.kind = $1 AND r.requester_id = $2
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(kind)
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// All requests of one kind, optionally filtered by status
    pub async fn list_all(
        &self,
        kind: RequestKind,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<RequestSummary>> {
        let requests = sqlx::query_as::<_, RequestSummary>(
            r#"
            SELECT r.id, r.kind, r.requester_id, u.full_name AS requester_name,
                   r.status, r.created_at, r.decided_at
            FROM requests r
            JOIN users u ON u.id = r.requester_id
            WHERE r.kind = $1 AND ($2::text IS NULL OR r.status = $2)
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(kind)
        .bind(status.map(|s| s.as_str().to_string()))
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Full request with line items and resolved requester/approver names
    pub async fn get_details(&self, kind: RequestKind, id: i32) -> AppResult<RequestDetails> {
        let request = self.get_by_id(kind, id).await?;

        let requester_name: String =
            sqlx::query_scalar("SELECT full_name FROM users WHERE id = $1")
                .bind(request.requester_id)
                .fetch_one(&self.pool)
                .await?;

        let approver_name = match request.approver_id {
            Some(approver_id) => {
                sqlx::query_scalar::<_, String>("SELECT full_name FROM users WHERE id = $1")
                    .bind(approver_id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => None,
        };

        let line_items = sqlx::query_as::<_, LineItemDetails>(
            r#"
            SELECT ri.id, ri.item_id, i.name AS item_name, c.name AS category_name, ri.quantity
            FROM request_items ri
            JOIN items i ON i.id = ri.item_id
            JOIN equipment_categories c ON c.id = i.category_id
            WHERE ri.request_id = $1
            ORDER BY ri.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(RequestDetails {
            request,
            requester_name,
            approver_name,
            line_items,
        })
    }

    /// Transition Pending -> Approved/Rejected, setting approver, decision
    /// timestamp, and note in the same statement.
    ///
    /// The `status = 'pending'` guard makes the check-and-set atomic: a
    /// request that is no longer pending matches zero rows, and the caller
    /// gets `InvalidState` after a re-read.
    pub async fn decide(
        &self,
        kind: RequestKind,
        id: i32,
        target: RequestStatus,
        approver_id: i32,
        note: Option<&str>,
    ) -> AppResult<Request> {
        let updated = sqlx::query_as::<_, Request>(
            r#"
            UPDATE requests
            SET status = $3, approver_id = $4, decided_at = NOW(), decision_note = $5
            WHERE id = $1 AND kind = $2 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(kind)
        .bind(target)
        .bind(approver_id)
        .bind(note)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(request) => Ok(request),
            None => {
                let current = self.get_by_id(kind, id).await?;
                Err(AppError::InvalidState(format!(
                    "{} {} is {}, only pending requests can be decided",
                    kind.label(),
                    id,
                    current.status
                )))
            }
        }
    }

    /// Transition Approved -> Returned with the same atomic guard
    pub async fn mark_returned(&self, kind: RequestKind, id: i32) -> AppResult<Request> {
        let updated = sqlx::query_as::<_, Request>(
            r#"
            UPDATE requests
            SET status = 'returned', returned_at = NOW()
            WHERE id = $1 AND kind = $2 AND status = 'approved'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(kind)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(request) => Ok(request),
            None => {
                let current = self.get_by_id(kind, id).await?;
                Err(AppError::InvalidState(format!(
                    "{} {} is {}, only approved requests can be returned",
                    kind.label(),
                    id,
                    current.status
                )))
            }
        }
    }
}
