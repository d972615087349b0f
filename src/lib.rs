//! Kadro - HR Management System
//!
//! A Rust implementation of the Kadro HR management server, providing a
//! REST JSON API for equipment requests, leave requests, staff
//! administration and document distribution.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
