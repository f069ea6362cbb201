//! Autoreply Server - HTTP REST API for the keyword auto-response engine
//!
//! Serves the widget match endpoint plus the dashboard's rule management
//! and analytics routes.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` is optional; real environment variables win
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;
    server::start_server(config).await?;

    Ok(())
}
