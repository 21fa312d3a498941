use anyhow::Context;
use tokio::net::TcpListener;
use todo_server::{app, telemetry, AppState, Config, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Existing environment variables take precedence over the file.
    let dotenv_path = dotenvy::dotenv().ok();
    telemetry::init_tracing()?;
    if let Some(path) = dotenv_path {
        tracing::info!(path = %path.display(), "loaded .env");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return Err(e.into());
        }
    };

    let db = Database::connect(&config.database)
        .await
        .context("connecting to database")?;
    db.ensure_schema().await.context("creating todos table")?;

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    tracing::warn!("CORS: permissive mode enabled, all origins allowed (testing only)");
    tracing::info!("listening on {}", config.bind_addr);

    let served = axum::serve(listener, app(AppState::new(db.clone())))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db.close().await;
    served?;
    tracing::info!("server shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
