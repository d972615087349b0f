//! Document distribution endpoints

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::{
        document::{Document, DocumentDetails},
        envelope::ApiResponse,
        user::Permission,
    },
};

use super::AuthenticatedUser;

/// Upload a document. Fields: title, department_id? (absent =
/// company-wide), file
#[utoipa::path(
    post,
    path = "/documents",
    tag = "documents",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Document stored"),
        (status = 400, description = "Missing title or file"),
        (status = 403, description = "Caller may not manage documents")
    )
)]
pub async fn upload_document(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Document>>)> {
    claims.require(Permission::ManageDocuments)?;

    let mut title: Option<String> = None;
    let mut department_id: Option<i32> = None;
    let mut file: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => {
                title = Some(field.text().await.map_err(|e| {
                    AppError::validation(format!("Invalid title field: {}", e))
                })?)
            }
            "department_id" => {
                let text = field.text().await.map_err(|e| {
                    AppError::validation(format!("Invalid department_id field: {}", e))
                })?;
                department_id = Some(text.parse().map_err(|_| {
                    AppError::validation("department_id must be an integer")
                })?);
            }
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Invalid file upload: {}", e))
                })?;
                file = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let title = title.ok_or_else(|| AppError::validation("title is required"))?;
    let (file_name, bytes) = file.ok_or_else(|| AppError::validation("file is required"))?;

    let document = state
        .services
        .documents
        .upload(
            &title,
            file_name.as_deref(),
            &bytes,
            department_id,
            claims.user_id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Document uploaded", document)),
    ))
}

/// Documents visible to the caller: their department's plus company-wide
#[utoipa::path(
    get,
    path = "/documents",
    tag = "documents",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Visible documents"))
)]
pub async fn list_documents(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ApiResponse<Vec<DocumentDetails>>>> {
    let documents = if claims.role.allows(Permission::ManageDocuments) {
        state.services.documents.list_all().await?
    } else {
        state
            .services
            .documents
            .list_visible(claims.department_id)
            .await?
    };

    Ok(Json(ApiResponse::ok("Documents retrieved", documents)))
}

/// Download a document's content
#[utoipa::path(
    get,
    path = "/documents/{id}/download",
    tag = "documents",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document content"),
        (status = 404, description = "Document not found")
    )
)]
pub async fn download_document(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let (document, bytes) = state.services.documents.download(id).await?;

    Ok((
        [(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", document.title),
        )],
        bytes,
    )
        .into_response())
}
