//! OpenAPI documentation

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    auth, departments, documents, health, items, leaves, notifications, requests, users,
};
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kadro API",
        version = "1.0.0",
        description = "HR Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Kadro Team", email = "contact@kadro.local")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Requests (served under /equipment-requests, /equipment-returns,
        // and /change-requests)
        requests::create,
        requests::list_own,
        requests::list_all,
        requests::get_details,
        requests::approve,
        requests::reject,
        requests::update_status,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Departments
        departments::list_departments,
        departments::create_department,
        departments::rename_department,
        // Catalog
        items::list_categories,
        items::create_category,
        items::list_available_items,
        items::list_all_items,
        items::create_item,
        items::update_item,
        // Leaves
        leaves::create_leave,
        leaves::list_own_leaves,
        leaves::list_all_leaves,
        leaves::approve_leave,
        leaves::reject_leave,
        // Documents
        documents::upload_document,
        documents::list_documents,
        documents::download_document,
        // Notifications
        notifications::list_notifications,
        notifications::mark_read,
    ),
    components(
        schemas(
            health::HealthResponse,
            auth::LoginResponse,
            models::user::User,
            models::user::UserShort,
            models::user::Role,
            models::user::UserStatus,
            models::user::CreateUser,
            models::user::UpdateUser,
            models::user::LoginRequest,
            models::department::Department,
            models::department::CreateDepartment,
            models::item::EquipmentCategory,
            models::item::Item,
            models::item::ItemWithCategory,
            models::item::ItemPublic,
            models::item::CreateCategory,
            models::item::CreateItem,
            models::item::UpdateItem,
            models::request::Request,
            models::request::RequestKind,
            models::request::RequestStatus,
            models::request::RequestLineItem,
            models::request::LineItemDetails,
            models::request::RequestDetails,
            models::request::RequestSummary,
            models::request::CreateRequest,
            models::request::CreateLineItem,
            models::request::ApproveRequest,
            models::request::RejectRequest,
            models::request::UpdateStatusRequest,
            models::leave::LeaveRequest,
            models::leave::LeaveRequestDetails,
            models::document::Document,
            models::document::DocumentDetails,
            models::notification::Notification,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication"),
        (name = "requests", description = "Request lifecycle"),
        (name = "users", description = "Staff administration"),
        (name = "departments", description = "Departments"),
        (name = "catalog", description = "Equipment catalog"),
        (name = "leaves", description = "Leave requests"),
        (name = "documents", description = "Document distribution"),
        (name = "notifications", description = "Notifications"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
