//! Department service

use crate::{error::AppResult, models::department::Department, repository::Repository};

#[derive(Clone)]
pub struct DepartmentsService {
    repository: Repository,
}

impl DepartmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Department>> {
        self.repository.departments.list().await
    }

    pub async fn create(&self, name: &str) -> AppResult<Department> {
        self.repository.departments.create(name).await
    }

    pub async fn rename(&self, id: i32, name: &str) -> AppResult<Department> {
        self.repository.departments.rename(id, name).await
    }
}
