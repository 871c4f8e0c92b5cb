//! Serve command - Starts the HTTP server.

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::services::Services;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let services = if args.in_memory {
        tracing::warn!("Using in-memory storage; data is lost on shutdown");
        Services::in_memory()
    } else {
        let db = Database::connect(&config)
            .await
            .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;
        Services::from_database(db)
    };

    let app = create_router(AppState::from_services(&services));

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
