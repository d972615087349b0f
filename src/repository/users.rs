//! Users repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{map_unique_violation, AppError, AppResult},
    models::user::{Role, User, UserShort, UserStatus},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Get user by email, used by login
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// List users with optional name/department filters
    pub async fn list(
        &self,
        name: Option<&str>,
        department_id: Option<i32>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserShort>> {
        let users = sqlx::query_as::<_, UserShort>(
            r#"
            SELECT u.id, u.full_name, u.email, u.role, u.department_id,
                   d.name AS department_name, u.status
            FROM users u
            LEFT JOIN departments d ON d.id = u.department_id
            WHERE u.status != 'deleted'
              AND ($1::text IS NULL OR u.full_name ILIKE '%' || $1 || '%')
              AND ($2::int IS NULL OR u.department_id = $2)
            ORDER BY u.full_name
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(name)
        .bind(department_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Insert a new user; email and national_id uniqueness is enforced by
    /// the database and surfaced as a conflict.
    pub async fn create(
        &self,
        full_name: &str,
        email: &str,
        national_id: &str,
        password_hash: &str,
        role: Role,
        department_id: Option<i32>,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, national_id, password, role, department_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'active')
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(national_id)
        .bind(password_hash)
        .bind(role)
        .bind(department_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Email or national ID already in use"))
    }

    /// Apply a partial update; None fields keep their current value
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i32,
        full_name: Option<&str>,
        email: Option<&str>,
        national_id: Option<&str>,
        password_hash: Option<&str>,
        role: Option<Role>,
        department_id: Option<i32>,
        status: Option<UserStatus>,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                national_id = COALESCE($4, national_id),
                password = COALESCE($5, password),
                role = COALESCE($6, role),
                department_id = COALESCE($7, department_id),
                status = COALESCE($8, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .bind(national_id)
        .bind(password_hash)
        .bind(role)
        .bind(department_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Email or national ID already in use"))?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Soft delete: requests keep valid requester/approver references
    pub async fn soft_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE users SET status = 'deleted' WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}
