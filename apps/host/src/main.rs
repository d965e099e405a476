mod config;
mod errors;
mod page;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting intake host v{}", env!("CARGO_PKG_VERSION"));
    info!(
        env = %config.env,
        static_dir = %config.static_dir,
        upload_action = %config.upload_action,
        customers = config.customers.len(),
        max_upload_bytes = config.max_upload_bytes,
        "Configuration loaded"
    );
    if config.customers.is_empty() {
        tracing::warn!("CUSTOMERS is empty; the upload form cannot be submitted");
    }

    let state = AppState::new(config.clone());
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
