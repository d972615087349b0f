//! Kadro Server - HR Management System
//!
//! REST API server for equipment requests, leaves, staff and documents.

use axum::{
    routing::{get, post, put},
    Extension, Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kadro_server::{
    api, config::AppConfig, models::request::RequestKind, repository::Repository,
    services::Services, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("kadro_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Kadro Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.auth.clone(),
        config.email.clone(),
        config.storage.clone(),
    );

    // First-start administrator account
    services
        .users
        .ensure_bootstrap_admin(
            &config.auth.bootstrap_admin_email,
            &config.auth.bootstrap_admin_password,
        )
        .await
        .expect("Failed to create bootstrap administrator");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes shared by every request kind; the kind is injected as an extension
/// so the same handlers serve all three route groups
fn request_routes(kind: RequestKind) -> Router<AppState> {
    Router::new()
        .route("/", post(api::requests::create))
        .route("/", get(api::requests::list_own))
        .route("/all", get(api::requests::list_all))
        .route("/:id", get(api::requests::get_details))
        .route("/:id/approve", put(api::requests::approve))
        .route("/:id/reject", put(api::requests::reject))
        .route("/:id/status", put(api::requests::update_status))
        .layer(Extension(kind))
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Request lifecycle, one route group per kind
        .nest(
            "/equipment-requests",
            request_routes(RequestKind::EquipmentRequest),
        )
        .nest(
            "/equipment-returns",
            request_routes(RequestKind::EquipmentReturn),
        )
        .nest("/change-requests", request_routes(RequestKind::ChangeRequest))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        .route("/users/:id", axum::routing::delete(api::users::delete_user))
        // Departments
        .route("/departments", get(api::departments::list_departments))
        .route("/departments", post(api::departments::create_department))
        .route("/departments/:id", put(api::departments::rename_department))
        // Equipment catalog
        .route("/categories", get(api::items::list_categories))
        .route("/categories", post(api::items::create_category))
        .route("/items", get(api::items::list_available_items))
        .route("/items/all", get(api::items::list_all_items))
        .route("/items", post(api::items::create_item))
        .route("/items/:id", put(api::items::update_item))
        // Leave requests
        .route("/leave-requests", post(api::leaves::create_leave))
        .route("/leave-requests", get(api::leaves::list_own_leaves))
        .route("/leave-requests/all", get(api::leaves::list_all_leaves))
        .route("/leave-requests/:id/approve", put(api::leaves::approve_leave))
        .route("/leave-requests/:id/reject", put(api::leaves::reject_leave))
        // Documents
        .route("/documents", post(api::documents::upload_document))
        .route("/documents", get(api::documents::list_documents))
        .route(
            "/documents/:id/download",
            get(api::documents::download_document),
        )
        // Notifications
        .route("/notifications", get(api::notifications::list_notifications))
        .route("/notifications/:id/read", put(api::notifications::mark_read))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
