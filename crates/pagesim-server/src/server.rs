//! HTTP server startup and shutdown.

use crate::api::create_router;
use crate::session::{BusyPolicy, SessionService};
use anyhow::{Context, Result};
use pagesim_common::PagesimConfig;
use std::sync::Arc;
use tracing::{error, info};

/// Serves the HTTP API until Ctrl+C or SIGTERM.
pub async fn serve(config: PagesimConfig) -> Result<()> {
    let busy_policy = BusyPolicy::from_reject_flag(config.server.reject_when_busy);
    let session = SessionService::new(config.engine.clone(), busy_policy)
        .context("invalid engine configuration")?;
    let app = create_router(Arc::new(session));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(
        page_table_size = config.engine.page_table_size,
        frame_count = config.engine.frame_count,
        algorithm = %config.engine.algorithm,
        "Server listening on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
