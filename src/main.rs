use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

use airglobe_assistant::config::Config;
use airglobe_assistant::handlers::{self, AppState};
use airglobe_assistant::service::AssistantService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(Config::load());

    let service = Arc::new(AssistantService::new(&config)?);
    let state = Arc::new(AppState { service });
    let router = handlers::router(state);

    let bind: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", config.server.bind))?;

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "Starting AirGlobe assistant endpoint");
    axum::serve(listener, router).await?;
    Ok(())
}
