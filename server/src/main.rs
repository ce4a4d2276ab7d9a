use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wild_gif_chase::config::Config;
use wild_gif_chase::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wild_gif_chase=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::parse();
  let addr = config.listen_addr()?;

  // Index and templates must be complete before the listener starts.
  let state = AppState::load(&config.src, &config.templates)
    .with_context(|| format!("failed to start with source directory {}", config.src.display()))?
    .shared();

  let handle = axum_server::Handle::new();
  tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

  tracing::info!("Listening on {}", addr);
  axum_server::bind(addr)
    .handle(handle)
    .serve(app(state).into_make_service_with_connect_info::<SocketAddr>())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_on_ctrl_c(handle: axum_server::Handle) {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!("failed to listen for ctrl-c: {}", e);
    return;
  }
  tracing::info!("Shutting down");
  handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
