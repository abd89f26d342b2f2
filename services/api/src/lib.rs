//! Portfolio backend API
//!
//! A single-owner portfolio service: public blog/project/skill/education/
//! experience/contact endpoints plus an owner-only admin surface, protected
//! by a JWT access/refresh token pair.

pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod password;
pub mod repositories;
pub mod response;
pub mod routes;
pub mod slug;
pub mod state;
pub mod validation;

use anyhow::Result;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use common::database::{DatabaseConfig, health_check, init_pool};
use common::error::DatabaseError;

use crate::config::AppConfig;
use crate::state::AppState;

/// CORS layer for the configured origins; credentials are always allowed
/// because the auth cookies ride along on every request.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
}

/// Bootstrap the service: config, pool, migrations, router, serve
pub async fn run() -> Result<()> {
    info!("Starting portfolio API service");

    let config = AppConfig::from_env();

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Apply pending migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    info!("Portfolio API service initialized successfully");

    let addr = format!("0.0.0.0:{}", config.port);
    let cors = cors_layer(&config.allowed_origins);
    let app_state = AppState::new(config, pool);

    // Start the web server
    let app = routes::create_router(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Portfolio API service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
