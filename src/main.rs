use std::net::SocketAddr;
use std::time::Duration;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diet_tracker_server::{open_store, AppState, Config, RelayClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diet_tracker_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Diet Tracker Server...");

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Environment: {}, Server: {}",
        config.environment,
        config.server_address()
    );

    // Open the embedded store
    let store = open_store(&config.database_path)?;

    // Webhook relay client (optional endpoint, bounded timeout)
    let relay = RelayClient::new(
        config.webhook_url.clone(),
        Duration::from_secs(config.relay_timeout_secs),
    )?;

    match &config.webhook_url {
        Some(url) => tracing::info!("Meal relay configured: {}", url),
        None => tracing::info!("Meal relay not configured, meals are saved locally only"),
    }

    // Create app state and router
    let state = AppState::new(store, config.clone(), relay);
    let app = diet_tracker_server::router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.server_address().parse()?;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
