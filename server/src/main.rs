use std::sync::Arc;

use tokio::net::TcpListener;
use todo_htmx_core::{seed_demo, InMemoryContentStore};
use todo_htmx_server::{AppState, ServerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let store = Arc::new(InMemoryContentStore::new());
    if config.seed_demo {
        let list = seed_demo(&store)?;
        tracing::info!(list = list.id.0, "seeded demo todo list");
    }

    let state = AppState::new(store)?;
    let listener = TcpListener::bind(config.socket_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    todo_htmx_server::run(listener, state).await?;
    Ok(())
}
