//! Leave request service

use crate::{
    error::{AppError, AppResult},
    models::{
        leave::{CreateLeave, LeaveRequest, LeaveRequestDetails},
        request::{Decision, RequestStatus},
    },
    repository::Repository,
    services::email::EmailService,
};

#[derive(Clone)]
pub struct LeavesService {
    repository: Repository,
    email: EmailService,
}

impl LeavesService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    pub async fn create(&self, user_id: i32, leave: CreateLeave) -> AppResult<LeaveRequest> {
        let user = self.repository.users.get_by_id(user_id).await?;
        if !user.is_active() {
            return Err(AppError::validation("Requester account is not active"));
        }
        if leave.end_date < leave.start_date {
            return Err(AppError::validation("End date must not precede start date"));
        }

        self.repository.leaves.create(user_id, &leave).await
    }

    pub async fn list_own(&self, user_id: i32) -> AppResult<Vec<LeaveRequest>> {
        self.repository.leaves.list_for_user(user_id).await
    }

    pub async fn list_all(
        &self,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<LeaveRequestDetails>> {
        self.repository.leaves.list_all(status).await
    }

    /// Same decision semantics as the request engine: atomic pending
    /// guard, best-effort notification.
    pub async fn decide(
        &self,
        id: i32,
        decision: Decision,
        approver_id: i32,
        note: Option<String>,
    ) -> AppResult<LeaveRequest> {
        let leave = self
            .repository
            .leaves
            .decide(id, decision.target_status(), approver_id, note.as_deref())
            .await?;

        tracing::info!(leave_id = leave.id, status = %leave.status, approver_id, "leave decided");

        let repository = self.repository.clone();
        let email = self.email.clone();
        let notified = leave.clone();
        tokio::spawn(async move {
            let title = format!("Leave request {}", notified.status);
            let body = format!(
                "Your leave request #{} ({}) has been {}.",
                notified.id, notified.leave_type, notified.status
            );

            if let Err(e) = repository
                .notifications
                .create(notified.user_id, &title, &body)
                .await
            {
                tracing::warn!(leave_id = notified.id, "failed to store notification: {}", e);
            }

            match repository.users.get_by_id(notified.user_id).await {
                Ok(user) => {
                    if let Err(e) = email.send_notice(&user.email, &title, &body).await {
                        tracing::warn!(leave_id = notified.id, "failed to email notice: {}", e);
                    }
                }
                Err(e) => tracing::warn!(leave_id = notified.id, "requester lookup failed: {}", e),
            }
        });

        Ok(leave)
    }
}
