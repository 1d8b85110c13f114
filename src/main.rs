use std::net::SocketAddr;

use resume_desk::{AppState, Config, HttpBackend, router};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let backend = HttpBackend::new(config.backend_url.as_str(), config.request_timeout)?;
    info!(
        backend = backend.base_url(),
        schema = ?config.schema,
        timeout = ?config.request_timeout,
        "backend configured"
    );

    let app = router(AppState::new(backend, config.schema));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        return;
    }
    info!("shutting down");
}
