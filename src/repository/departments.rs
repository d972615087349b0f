//! Departments repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{map_unique_violation, AppError, AppResult},
    models::department::Department,
};

#[derive(Clone)]
pub struct DepartmentsRepository {
    pool: Pool<Postgres>,
}

impl DepartmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Department> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }

    pub async fn list(&self) -> AppResult<Vec<Department>> {
        let departments =
            sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(departments)
    }

    pub async fn create(&self, name: &str) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Department name already exists"))
    }

    pub async fn rename(&self, id: i32, name: &str) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            "UPDATE departments SET name = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Department name already exists"))?
        .ok_or_else(|| AppError::NotFound(format!("Department {} not found", id)))
    }
}
