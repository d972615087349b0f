//! Request lifecycle engine: creation, validation, decisions, and the
//! Return stage for all three request kinds

use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        item::{pinned_quantity, ItemWithCategory},
        request::{
            CreateRequest, Decision, Request, RequestDetails, RequestKind, RequestStatus,
            RequestSummary,
        },
    },
    repository::Repository,
    services::email::EmailService,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    email: EmailService,
}

impl RequestsService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    /// Create a request in Pending state, approver unset.
    ///
    /// Line items are validated against the catalog and quantities
    /// normalized through the fixed-asset rule before anything is stored;
    /// the request and its line items go in as one transaction.
    pub async fn create(
        &self,
        kind: RequestKind,
        requester_id: i32,
        payload: CreateRequest,
    ) -> AppResult<RequestDetails> {
        let requester = self.repository.users.get_by_id(requester_id).await?;
        if !requester.is_active() {
            return Err(AppError::validation("Requester account is not active"));
        }

        let mut errors = Vec::new();

        if kind.carries_line_items() && payload.line_items.is_empty() {
            errors.push("At least one line item is required".to_string());
        }
        if !kind.carries_line_items() && payload.details.as_deref().unwrap_or("").trim().is_empty()
        {
            errors.push("A description of the requested change is required".to_string());
        }

        let item_ids: Vec<i32> = payload.line_items.iter().map(|li| li.item_id).collect();
        let catalog = if item_ids.is_empty() {
            Vec::new()
        } else {
            self.repository.items.get_many_with_category(&item_ids).await?
        };
        let by_id: HashMap<i32, &ItemWithCategory> =
            catalog.iter().map(|item| (item.id, item)).collect();

        let mut line_items = Vec::with_capacity(payload.line_items.len());
        for line in &payload.line_items {
            match by_id.get(&line.item_id) {
                None => errors.push(format!("Item {} does not exist", line.item_id)),
                Some(item) if !item.approved => {
                    errors.push(format!("Item '{}' is not available for requests", item.name))
                }
                Some(item) => {
                    if !item.fixed_asset && line.quantity < 1 {
                        errors.push(format!("Quantity for '{}' must be at least 1", item.name));
                    } else {
                        line_items
                            .push((line.item_id, pinned_quantity(item.fixed_asset, line.quantity)));
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(AppError::validation_errors(
                "Request validation failed",
                errors,
            ));
        }

        let request = self
            .repository
            .requests
            .create(
                kind,
                requester.id,
                requester.department_id,
                payload.details.as_deref(),
                &line_items,
            )
            .await?;

        self.repository.requests.get_details(kind, request.id).await
    }

    /// The requester's own requests, no implicit status filtering
    pub async fn list_for_requester(
        &self,
        kind: RequestKind,
        requester_id: i32,
    ) -> AppResult<Vec<RequestSummary>> {
        self.repository
            .requests
            .list_for_requester(kind, requester_id)
            .await
    }

    /// All requests of the kind; authorization happens at the boundary
    pub async fn list_all(
        &self,
        kind: RequestKind,
        status: Option<RequestStatus>,
    ) -> AppResult<Vec<RequestSummary>> {
        self.repository.requests.list_all(kind, status).await
    }

    pub async fn get_details(&self, kind: RequestKind, id: i32) -> AppResult<RequestDetails> {
        self.repository.requests.get_details(kind, id).await
    }

    /// Approve or reject a pending request.
    ///
    /// The approver, decision timestamp, and note are set atomically with
    /// the status change; a request that is no longer pending yields
    /// `InvalidState`. The requester notification is fire-and-forget: the
    /// decision is the source of truth and is never rolled back over a
    /// notification failure.
    pub async fn decide(
        &self,
        kind: RequestKind,
        id: i32,
        decision: Decision,
        approver_id: i32,
        note: Option<String>,
    ) -> AppResult<Request> {
        let request = self
            .repository
            .requests
            .decide(kind, id, decision.target_status(), approver_id, note.as_deref())
            .await?;

        tracing::info!(
            request_id = request.id,
            kind = %kind,
            status = %request.status,
            approver_id,
            "request decided"
        );

        self.notify_requester(&request);

        Ok(request)
    }

    /// Narrow transition for the Return flow: Approved -> Returned,
    /// equipment kinds only.
    pub async fn update_status(
        &self,
        kind: RequestKind,
        id: i32,
        target: RequestStatus,
    ) -> AppResult<Request> {
        if !RequestStatus::Approved.can_transition_to(target, kind) {
            return Err(AppError::InvalidState(format!(
                "Transition to {} is not permitted for a {}",
                target,
                kind.label().to_lowercase()
            )));
        }

        let request = self.repository.requests.mark_returned(kind, id).await?;

        tracing::info!(request_id = request.id, kind = %kind, "request returned");

        Ok(request)
    }

    /// Best-effort notification: in-app row plus email, spawned off the
    /// request path, failures logged and swallowed.
    fn notify_requester(&self, request: &Request) {
        let repository = self.repository.clone();
        let email = self.email.clone();
        let request = request.clone();

        tokio::spawn(async move {
            let title = format!("{} {}", request.kind.label(), request.status);
            let body = match request.decision_note.as_deref() {
                Some(note) if !note.is_empty() => format!(
                    "Your {} #{} has been {}. Note: {}",
                    request.kind.label().to_lowercase(),
                    request.id,
                    request.status,
                    note
                ),
                _ => format!(
                    "Your {} #{} has been {}.",
                    request.kind.label().to_lowercase(),
                    request.id,
                    request.status
                ),
            };

            if let Err(e) = repository
                .notifications
                .create(request.requester_id, &title, &body)
                .await
            {
                tracing::warn!(request_id = request.id, "failed to store notification: {}", e);
            }

            match repository.users.get_by_id(request.requester_id).await {
                Ok(user) => {
                    if let Err(e) = email.send_notice(&user.email, &title, &body).await {
                        tracing::warn!(
                            request_id = request.id,
                            "failed to email decision notice: {}",
                            e
                        );
                    }
                }
                Err(e) => {
                    tracing::warn!(request_id = request.id, "requester lookup failed: {}", e)
                }
            }
        });
    }
}
