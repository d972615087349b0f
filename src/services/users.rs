//! Staff administration service

use crate::{
    error::AppResult,
    models::user::{CreateUser, Role, UpdateUser, User, UserQuery, UserShort},
    repository::Repository,
    services::auth::AuthService,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    auth: AuthService,
}

impl UsersService {
    pub fn new(repository: Repository, auth: AuthService) -> Self {
        Self { repository, auth }
    }

    pub async fn get(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<UserShort>> {
        let per_page = query.per_page.unwrap_or(50).clamp(1, 200);
        let page = query.page.unwrap_or(1).max(1);

        self.repository
            .users
            .list(
                query.name.as_deref(),
                query.department_id,
                per_page,
                (page - 1) * per_page,
            )
            .await
    }

    pub async fn create(&self, payload: CreateUser) -> AppResult<User> {
        if let Some(department_id) = payload.department_id {
            self.repository.departments.get_by_id(department_id).await?;
        }

        let password_hash = self.auth.hash_password(&payload.password)?;

        self.repository
            .users
            .create(
                &payload.full_name,
                &payload.email,
                &payload.national_id,
                &password_hash,
                payload.role.unwrap_or(Role::User),
                payload.department_id,
            )
            .await
    }

    pub async fn update(&self, id: i32, payload: UpdateUser) -> AppResult<User> {
        if let Some(department_id) = payload.department_id {
            self.repository.departments.get_by_id(department_id).await?;
        }

        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(self.auth.hash_password(password)?),
            None => None,
        };

        self.repository
            .users
            .update(
                id,
                payload.full_name.as_deref(),
                payload.email.as_deref(),
                payload.national_id.as_deref(),
                password_hash.as_deref(),
                payload.role,
                payload.department_id,
                payload.status,
            )
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users.soft_delete(id).await
    }

    /// Create the administrator account on first start against an empty
    /// database, so the instance is usable without manual SQL.
    pub async fn ensure_bootstrap_admin(&self, email: &str, password: &str) -> AppResult<()> {
        if self.repository.users.get_by_email(email).await?.is_some() {
            return Ok(());
        }

        let password_hash = self.auth.hash_password(password)?;
        let user = self
            .repository
            .users
            .create(
                "System Administrator",
                email,
                "00000000",
                &password_hash,
                Role::Admin,
                None,
            )
            .await?;

        tracing::info!(user_id = user.id, email, "Created bootstrap administrator");
        Ok(())
    }
}
