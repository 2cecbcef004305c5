use hours_log::{router, AppState, Config, HoursStore};
use std::net::SocketAddr;
use tokio::fs;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    let store = HoursStore::open(&config.db_path)?;
    info!(path = %config.db_path.display(), "opened hours database");

    let state = match config.api_url.as_deref() {
        Some(url) => {
            info!("pages use remote hours API at {url}");
            AppState::remote(store, url)
        }
        None => AppState::local(store),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            error!("failed to listen for shutdown signal: {err}");
            std::future::pending::<()>().await;
        }
    }
}
