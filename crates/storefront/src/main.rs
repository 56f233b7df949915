//! # Storefront server
//!
//! 1. Tracing, then configuration from the environment (and `.env`).
//! 2. [`StorefrontSystem`] starts the Product store.
//! 3. The axum router serves until Ctrl+C or SIGTERM.
//! 4. The store drains and shuts down.

use actor_framework::tracing::setup_tracing;
use storefront::config::Config;
use storefront::http;
use storefront::lifecycle::StorefrontSystem;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config =
        Config::load().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;

    let system = StorefrontSystem::new(config.mailbox_capacity);
    let app = http::router(system.product_client.clone(), config.cors_max_age);

    let address = config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(http::shutdown_signal())
        .await?;

    system.shutdown().await?;
    info!("Server stopped");
    Ok(())
}
