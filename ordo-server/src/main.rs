//! Ordo server binary

use std::net::SocketAddr;

use anyhow::Context;
use ordo_server::utils::logger::init_logger_with_file;
use ordo_server::{Config, ServerState, api};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let log_dir = config.log_dir();
    if let Some(dir) = &log_dir {
        let _ = std::fs::create_dir_all(dir);
    }
    init_logger_with_file(
        Some(&config.log_level),
        log_dir.as_deref().and_then(|p| p.to_str()),
    );

    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        "Starting Ordo server"
    );

    let state = ServerState::initialize(config.clone())
        .await
        .context("server initialization failed")?;

    let app = api::build_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
