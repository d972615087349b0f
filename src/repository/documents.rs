//! Documents repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::document::{Document, DocumentDetails},
};

#[derive(Clone)]
pub struct DocumentsRepository {
    pool: Pool<Postgres>,
}

impl DocumentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Document> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))
    }

    pub async fn create(
        &self,
        title: &str,
        file_path: &str,
        department_id: Option<i32>,
        uploaded_by: i32,
    ) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (title, file_path, department_id, uploaded_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(file_path)
        .bind(department_id)
        .bind(uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Documents visible to a member of the given department: their own
    /// department's plus company-wide ones.
    pub async fn list_visible(&self, department_id: Option<i32>) -> AppResult<Vec<DocumentDetails>> {
        let documents = sqlx::query_as::<_, DocumentDetails>(
            r#"
            SELECT doc.id, doc.title, doc.file_path, doc.department_id,
                   d.name AS department_name, doc.uploaded_by,
                   u.full_name AS uploader_name, doc.created_at
            FROM documents doc
            LEFT JOIN departments d ON d.id = doc.department_id
            JOIN users u ON u.id = doc.uploaded_by
            WHERE doc.department_id IS NULL
               OR ($1::int IS NOT NULL AND doc.department_id = $1)
            ORDER BY doc.created_at DESC
            "#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }

    /// All documents, for administrators
    pub async fn list_all(&self) -> AppResult<Vec<DocumentDetails>> {
        let documents = sqlx::query_as::<_, DocumentDetails>(
            r#"
            SELECT doc.id, doc.title, doc.file_path, doc.department_id,
                   d.name AS department_name, doc.uploaded_by,
                   u.full_name AS uploader_name, doc.created_at
            FROM documents doc
            LEFT JOIN departments d ON d.id = doc.department_id
            JOIN users u ON u.id = doc.uploaded_by
            ORDER BY doc.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(documents)
    }
}
