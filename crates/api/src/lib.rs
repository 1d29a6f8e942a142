//! # Slotwise API
//!
//! The API crate provides the web server for the Slotwise appointment
//! scheduling service. It maps RESTful endpoints 1:1 onto the booking and
//! status engines in `slotwise-engine`.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into engine and repository calls
//! - **Middleware**: Caller identification and error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers that bridge HTTP and the engines
pub mod handlers;
/// Middleware for caller identification and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use slotwise_engine::notify::{LogNotifier, Notifier};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Outbound notification sender (fire-and-forget from booking)
    pub notifier: Arc<dyn Notifier>,
}

/// Starts the API server with the provided configuration and database connection
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool,
        notifier: Arc::new(LogNotifier),
    });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Booking and appointment lifecycle endpoints
        .merge(routes::appointments::routes())
        // Slot administration endpoints
        .merge(routes::slots::routes())
        // Service catalog endpoints
        .merge(routes::services::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware. The timeout service is fallible, so it
    // needs an error handler in front of it to satisfy the router.
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(
                middleware::error_handling::handle_middleware_error,
            ))
            .timeout(std::time::Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
