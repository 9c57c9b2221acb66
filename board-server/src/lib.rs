//! Board Server
//!
//! Task service for the kanban board: SQLite storage behind a small JSON
//! API. The board reads a board's tasks and patches a task's status.

pub mod api;
pub mod config;
pub mod domain;
pub mod repository;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use api::{api_router, AppState, SharedState};
use config::ServerConfig;
use repository::{open_db, TaskRepository};

/// Router with state and CORS applied. The front end is served from
/// another origin, so any origin may call the API.
pub fn build_router(state: SharedState) -> Router {
    api_router().with_state(state).layer(CorsLayer::permissive())
}

/// Open the database and serve until Ctrl+C
pub async fn run(config: ServerConfig) -> Result<(), String> {
    let conn = open_db(&config.db).map_err(|e| e.to_string())?;
    tracing::info!(db = %config.db.display(), "database ready");

    let state = Arc::new(AppState {
        tasks: TaskRepository::new(conn),
    });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", config.bind, e))?;
    let local_addr = listener.local_addr().map_err(|e| e.to_string())?;
    let _ = rolling_logger::info(&format!("Board server listening on http://{}", local_addr));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
