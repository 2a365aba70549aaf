//! Nexus Portal API
//!
//! HTTP front end standing in for the browser UI: authentication, routing
//! decisions, and certificate upload/retrieval over REST.

mod config;
mod error;
mod handlers;
mod state;

use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Nexus Portal API");

    let config = Config::from_env()?;
    let port = config.http_port;
    let state = AppState::new(config).await;
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::ready))
        .route("/api/v1/auth/register", post(handlers::register))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/api/v1/auth/logout", post(handlers::logout))
        .route(
            "/api/v1/auth/resend-verification",
            post(handlers::resend_verification),
        )
        .route("/api/v1/auth/session", get(handlers::session))
        .route("/api/v1/route", get(handlers::route_decision))
        .route("/api/v1/students", get(handlers::list_students))
        .route("/api/v1/students/batches", get(handlers::list_batches))
        .route(
            "/api/v1/students/{uid}/certificates",
            get(handlers::student_certificates),
        )
        .route(
            "/api/v1/certificates",
            get(handlers::list_certificates).post(handlers::upload_certificate),
        )
        .with_state(state)
}
