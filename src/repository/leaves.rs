//! Leave requests repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        leave::{CreateLeave, LeaveRequest, LeaveRequestDetails},
        request::RequestStatus,
    },
};

#[derive(Clone)]
pub struct LeavesRepository {
    pool: Pool<Postgres>,
}

impl LeavesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<LeaveRequest> {
        sqlx::query_as::<_, LeaveRequest>("SELECT * FROM leave_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Leave request {} not found", id)))
    }

    pub async fn create(&self, user_id: i32, leave: &CreateLeave) -> AppResult<LeaveRequest> {
        sqlx::query_as::<_, LeaveRequest>(
            r#"
            INSERT INTO leave_requests
                (user_id, leave_type, start_date, end_date, reason, certificate_path, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&leave.leave_type)
        .bind(leave.start_date)
        .bind(leave.end_date)
        .bind(&leave.reason)
        .bind(&leave.certificate_path)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<LeaveRequest>> {
        let leaves = sqlx::query_as::<_, LeaveRequest>(
            "SELECT * FROM leave_requests WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(leaves)
    }

    pub async fn list_all(
        &self,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<LeaveRequestDetails>> {
        let leaves = sqlx::query_as::<_, LeaveRequestDetails>(
            r#"
            SELECT l.id, l.user_id, u.full_name AS user_name, l.leave_type,
                   l.start_date, l.end_date, l.reason, l.certificate_path,
                   l.status, l.approver_id, l.decided_at, l.decision_note, l.created_at
            FROM leave_requests l
            JOIN users u ON u.id = l.user_id
            WHERE ($1::text IS NULL OR l.status = $1)
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(status.map(|s| s.as_str().to_string()))
        .fetch_all(&self.pool)
        .await?;
        Ok(leaves)
    }

    /// Same atomic pending-guard as the requests repository
    pub async fn decide(
        &self,
        id: i32,
        target: RequestStatus,
        approver_id: i32,
        note: Option<&str>,
    ) -> AppResult<LeaveRequest> {
        let updated = sqlx::query_as::<_, LeaveRequest>(
            r#"
            UPDATE leave_requests
            SET status = $2, approver_id = $3, decided_at = NOW(), decision_note = $4
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(target)
        .bind(approver_id)
        .bind(note)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(leave) => Ok(leave),
            None => {
                let current = self.get_by_id(id).await?;
                Err(AppError::InvalidState(format!(
                    "Leave request {} is {}, only pending requests can be decided",
                    id, current.status
                )))
            }
        }
    }
}
