//! HTTP surface: routers for every module, merged under `/api/v1`

pub mod auth;
pub mod blog;
pub mod contact;
pub mod education;
pub mod experience;
pub mod project;
pub mod skill;

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use serde_json::json;

use crate::state::AppState;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .nest("/api/v1/auth", auth::router(state.clone()))
        .nest("/api/v1/blogs", blog::router(state.clone()))
        .nest("/api/v1/projects", project::router(state.clone()))
        .nest("/api/v1/skills", skill::router(state.clone()))
        .nest("/api/v1/experiences", experience::router(state.clone()))
        .nest("/api/v1/educations", education::router(state.clone()))
        .nest("/api/v1/contact", contact::router(state))
        .fallback(not_found)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Server is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Welcome route listing the mounted endpoints
pub async fn welcome() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Welcome to Portfolio API",
        "version": "1.0.0",
        "endpoints": {
            "auth": "/api/v1/auth",
            "blogs": "/api/v1/blogs",
            "projects": "/api/v1/projects",
            "skills": "/api/v1/skills",
            "experiences": "/api/v1/experiences",
            "educations": "/api/v1/educations",
            "contact": "/api/v1/contact",
        },
    }))
}

/// Fallback for unmatched routes
pub async fn not_found(uri: axum::http::Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "message": format!("Route not found - {}", uri),
        })),
    )
}
