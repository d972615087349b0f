//! Repository layer for database operations

pub mod departments;
pub mod documents;
pub mod items;
pub mod leaves;
pub mod notifications;
pub mod requests;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub departments: departments::DepartmentsRepository,
    pub items: items::ItemsRepository,
    pub requests: requests::RequestsRepository,
    pub leaves: leaves::LeavesRepository,
    pub documents: documents::DocumentsRepository,
    pub notifications: notifications::NotificationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            departments: departments::DepartmentsRepository::new(pool.clone()),
            items: items::ItemsRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            leaves: leaves::LeavesRepository::new(pool.clone()),
            documents: documents::DocumentsRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            pool,
        }
    }
}
