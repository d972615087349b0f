//! Document distribution service

use crate::{
    error::AppResult,
    models::document::{Document, DocumentDetails},
    repository::Repository,
    services::storage::StorageService,
};

#[derive(Clone)]
pub struct DocumentsService {
    repository: Repository,
    storage: StorageService,
}

impl DocumentsService {
    pub fn new(repository: Repository, storage: StorageService) -> Self {
        Self { repository, storage }
    }

    /// Store the file and record the document; a department of None
    /// distributes company-wide.
    pub async fn upload(
        &self,
        title: &str,
        file_name: Option<&str>,
        bytes: &[u8],
        department_id: Option<i32>,
        uploaded_by: i32,
    ) -> AppResult<Document> {
        if let Some(department_id) = department_id {
            self.repository.departments.get_by_id(department_id).await?;
        }

        let file_path = self.storage.save("documents", file_name, bytes).await?;

        self.repository
            .documents
            .create(title, &file_path, department_id, uploaded_by)
            .await
    }

    pub async fn list_visible(&self, department_id: Option<i32>) -> AppResult<Vec<DocumentDetails>> {
        self.repository.documents.list_visible(department_id).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<DocumentDetails>> {
        self.repository.documents.list_all().await
    }

    /// Load document content for download
    pub async fn download(&self, id: i32) -> AppResult<(Document, Vec<u8>)> {
        let document = self.repository.documents.get_by_id(id).await?;
        let bytes = self.storage.read(&document.file_path).await?;
        Ok((document, bytes))
    }
}
