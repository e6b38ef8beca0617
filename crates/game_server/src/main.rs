use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use game_server::config::{ServerConfig, CONFIG_ENV};
use game_server::{ws, Dispatcher, MemoryStore, Registry};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok())
        .map(PathBuf::from);
    let config = ServerConfig::load(path.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = Arc::new(MemoryStore::new());
    let seeded = config
        .seed
        .apply(&store)
        .context("failed to apply seed data")?;
    if !seeded.is_empty() {
        tracing::info!(games = ?seeded, "seeded games");
    }

    let registry = Arc::new(Registry::new());
    let dispatcher = Arc::new(Dispatcher::new(store.clone(), store, registry));
    let app = ws::router(dispatcher);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!(addr = %config.bind_addr, "game server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}
