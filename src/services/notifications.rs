//! In-app notification service

use crate::{error::AppResult, models::notification::Notification, repository::Repository};

#[derive(Clone)]
pub struct NotificationsService {
    repository: Repository,
}

impl NotificationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_own(&self, user_id: i32) -> AppResult<Vec<Notification>> {
        self.repository.notifications.list_for_user(user_id).await
    }

    pub async fn mark_read(&self, user_id: i32, id: i32) -> AppResult<()> {
        self.repository.notifications.mark_read(user_id, id).await
    }
}
