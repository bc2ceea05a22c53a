mod card;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::card::producer::CardProducer;
use crate::config::Config;
use crate::llm_client::{CompletionBackend, DeepSeekClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (every variable has a default)
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

    info!("Starting intro-card API v{}", env!("CARGO_PKG_VERSION"));

    let remote_budget = Duration::from_secs(config.remote_timeout_secs);

    // Initialize the remote backend. Without a credential the producer runs
    // template-only, which is a supported mode rather than an error.
    let remote: Option<Arc<dyn CompletionBackend>> = match &config.deepseek_api_key {
        Some(api_key) => {
            info!(
                "remote generation enabled (model: {}, budget: {}s)",
                llm_client::MODEL,
                config.remote_timeout_secs
            );
            Some(Arc::new(DeepSeekClient::new(
                &config.deepseek_base_url,
                api_key.clone(),
                remote_budget,
            )))
        }
        None => {
            warn!("DEEPSEEK_API_KEY not set, every card will use the local template");
            None
        }
    };

    // Initialize the card producer
    let producer = CardProducer::new(remote, config.short_intro_threshold, remote_budget);

    // Build app state
    let state = AppState {
        producer,
        config: config.clone(),
    };

    info!("Serving static files from {:?}", config.static_dir);

    // Build router (TraceLayer and CORS are applied inside build_router)
    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
