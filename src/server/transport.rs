//! TCP listener and graceful shutdown.

use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::routes::{AppState, router};

/// Listener settings for [`serve`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host name or IP literal to bind (`localhost`, `0.0.0.0`, `::1`).
    pub host: String,
    /// Port to bind; `0` picks a free port.
    pub port: u16,
    /// Optional directory of static frontend files.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            static_dir: None,
        }
    }
}

/// Runs the HTTP server until Ctrl-C or until `shutdown` is cancelled.
///
/// In-flight requests are allowed to finish before returning.
///
/// # Errors
///
/// Returns an error if the host does not resolve, the port cannot be bound or
/// the server fails while running.
pub async fn serve(
    config: &ServerConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let local_addr = listener.local_addr()?;

    let app = router(state, config.static_dir.as_deref());

    info!(
        addr = %local_addr,
        "support-router listening, POST http://{local_addr}/chat"
    );

    let token = shutdown.clone();
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    info!("received Ctrl-C, shutting down");
                    token.cancel();
                }
                Err(e) => {
                    warn!(error = %e, "could not install Ctrl-C handler");
                    token.cancelled().await;
                }
            },
            () = token.cancelled() => {}
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("server stopped");
    Ok(())
}
