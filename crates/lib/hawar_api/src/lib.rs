//! # hawar_api
//!
//! HTTP API library for Hawar.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, health};

/// Path of the multipart chat endpoint.
pub const CHAT_PATH: &str = "/api/chat";
/// Path of the health check endpoint.
pub const HEALTH_PATH: &str = "/api/health";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route(HEALTH_PATH, get(health::health_handler))
        .route(
            CHAT_PATH,
            post(chat::chat_handler).fallback(chat::method_not_allowed),
        )
        .layer(body_limit)
        .layer(cors)
        .with_state(state)
}
