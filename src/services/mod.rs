//! Business logic services

pub mod auth;
pub mod catalog;
pub mod departments;
pub mod documents;
pub mod email;
pub mod leaves;
pub mod notifications;
pub mod requests;
pub mod storage;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::{
    config::{AuthConfig, EmailConfig, StorageConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pool: Pool<Postgres>,
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub departments: departments::DepartmentsService,
    pub catalog: catalog::CatalogService,
    pub requests: requests::RequestsService,
    pub leaves: leaves::LeavesService,
    pub documents: documents::DocumentsService,
    pub notifications: notifications::NotificationsService,
    pub email: email::EmailService,
    pub storage: storage::StorageService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        email_config: EmailConfig,
        storage_config: StorageConfig,
    ) -> Self {
        let auth = auth::AuthService::new(repository.clone(), auth_config);
        let email = email::EmailService::new(email_config);
        let storage = storage::StorageService::new(storage_config);
        let pool = repository.pool.clone();

        Self {
            pool,
            users: users::UsersService::new(repository.clone(), auth.clone()),
            departments: departments::DepartmentsService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone(), email.clone()),
            leaves: leaves::LeavesService::new(repository.clone(), email.clone()),
            documents: documents::DocumentsService::new(repository.clone(), storage.clone()),
            notifications: notifications::NotificationsService::new(repository),
            auth,
            email,
            storage,
        }
    }

    /// Database pool handle, used by the readiness probe
    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}
