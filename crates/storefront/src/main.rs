use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager, env_flag},
    utils::init_logger,
};
use storefront::{handler::AppRouter, state::AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = env_flag("DEV_MODE", false);
    let is_enable_file = env_flag("ENABLE_FILE_LOG", false);

    init_logger("storefront", is_dev, is_enable_file);

    let config = Config::init().context("Failed to load configuration")?;

    let pool = ConnectionManager::new_pool(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to initialize database pool")?;

    if config.run_migrations {
        ConnectionManager::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let port = config.port;
    let state = AppState::new(pool.clone(), &config).await;

    info!("🚀 Storefront starting on port {port}");

    AppRouter::serve(port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down, closing database pool");
    pool.close().await;

    Ok(())
}
