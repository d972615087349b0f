//! Distributed document model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Document {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing)]
    pub file_path: String,
    /// Target department; null means company-wide
    pub department_id: Option<i32>,
    pub uploaded_by: i32,
    pub created_at: DateTime<Utc>,
}

/// Document joined with uploader and department names
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DocumentDetails {
    pub id: i32,
    pub title: String,
    #[serde(skip_serializing)]
    pub file_path: String,
    pub department_id: Option<i32>,
    pub department_name: Option<String>,
    pub uploaded_by: i32,
    pub uploader_name: String,
    pub created_at: DateTime<Utc>,
}
