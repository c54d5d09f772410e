//! axumサーバー起動・シャットダウンハンドリング

use crate::common::error::{GalleryError, GalleryResult};
use crate::AppState;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

/// axumサーバーを起動し、シャットダウンシグナルを待機する
pub async fn run(state: AppState, bind_addr: &str) -> GalleryResult<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| GalleryError::Config(format!("failed to bind {}: {}", bind_addr, e)))?;

    info!("App gallery server listening on {}", bind_addr);

    serve(state, listener, shutdown_signal()).await
}

/// バインド済みのリスナーで待ち受け、`shutdown` の完了で停止する
pub async fn serve<F>(state: AppState, listener: TcpListener, shutdown: F) -> GalleryResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = crate::api::create_app(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| GalleryError::Internal(format!("server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Ctrl+C / SIGTERM を待機
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
