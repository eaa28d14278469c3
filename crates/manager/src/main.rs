//! Catalog maintenance: bulk insert of the full product catalog and random
//! re-tagging of the featured, new and on-sale flags.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use shared::{
    abstract_trait::CatalogServiceTrait,
    config::{ConnectionManager, DatabaseConfig, env_flag, run_migrations_enabled},
    repository::ProductRepository,
    service::{CatalogService, CatalogServiceDeps},
    utils::init_logger,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Insert the catalog, then re-tag every product
    All,
    /// Insert the catalog on top of existing products
    Add,
    /// Delete every product, then insert the catalog
    Reset,
    /// Re-tag every product
    Update,
    /// Same as `update`
    Tag,
}

impl Mode {
    fn inserts(self) -> bool {
        matches!(self, Mode::All | Mode::Add | Mode::Reset)
    }

    fn tags(self) -> bool {
        matches!(self, Mode::All | Mode::Update | Mode::Tag)
    }
}

#[derive(Debug, Parser)]
#[command(name = "products-manager")]
#[command(about = "Insert the product catalog and re-tag products")]
struct Cli {
    #[arg(value_enum, default_value_t = Mode::All)]
    mode: Mode,

    /// Seed for the tagging shuffle, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

async fn run(cli: Cli, catalog: &dyn CatalogServiceTrait) -> Result<()> {
    if cli.mode.inserts() {
        let report = catalog
            .import_catalog(cli.mode == Mode::Reset)
            .await
            .context("Failed to insert catalog")?;

        if cli.mode == Mode::Reset {
            info!("🗑️ Removed {} existing products", report.deleted);
        }
        info!(
            "📦 Inserted {} products, {} skipped",
            report.inserted,
            report.failed.len()
        );
    }

    if cli.mode.tags() {
        let report = catalog.retag().await.context("Failed to tag products")?;
        info!(
            "🏷️ Tagged {} products: {} featured, {} new, {} on sale",
            report.total, report.featured, report.is_new, report.on_sale
        );
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    init_logger("products-manager", env_flag("DEV_MODE", true), false);

    let database = DatabaseConfig::init().context("Failed to load database configuration")?;
    let pool = ConnectionManager::new_pool(&database.url, database.max_connections)
        .await
        .context("Failed to connect to database")?;

    if run_migrations_enabled()? {
        ConnectionManager::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let products = ProductRepository::new(pool.clone());
    let catalog = CatalogService::new(CatalogServiceDeps {
        query: products.query,
        command: products.command,
        registry: Arc::new(Mutex::new(Registry::default())),
        rng_seed: cli.seed,
    })
    .await;

    info!("🛠️ Running products-manager in {:?} mode", cli.mode);

    let result = run(cli, &catalog).await;
    pool.close().await;

    match result {
        Ok(()) => {
            info!("✅ Done");
            Ok(())
        }
        Err(err) => {
            error!("❌ {err:#}");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{abstract_trait::ProductCommandRepositoryTrait, repository::MemoryStore};

    async fn service(store: Arc<MemoryStore>) -> CatalogService {
        CatalogService::new(CatalogServiceDeps {
            query: store.clone(),
            command: store,
            registry: Arc::new(Mutex::new(Registry::default())),
            rng_seed: Some(3),
        })
        .await
    }

    #[test]
    fn mode_defaults_to_all() {
        let cli = Cli::parse_from(["products-manager"]);
        assert_eq!(cli.mode, Mode::All);
        assert_eq!(cli.seed, None);

        let cli = Cli::parse_from(["products-manager", "reset", "--seed", "9"]);
        assert_eq!(cli.mode, Mode::Reset);
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from(["products-manager", "wipe"]).is_err());
    }

    #[tokio::test]
    async fn reset_replaces_existing_products() {
        let store = Arc::new(MemoryStore::new());
        let catalog = service(store.clone()).await;
        let cli = || Cli::parse_from(["products-manager", "reset"]);

        run(cli(), &catalog).await.unwrap();
        let first = store.products().await.len();
        run(cli(), &catalog).await.unwrap();

        assert_eq!(store.products().await.len(), first);
        assert!(store.products().await.iter().all(|p| !p.featured));
    }

    #[tokio::test]
    async fn tag_only_leaves_count_alone() {
        let store = Arc::new(MemoryStore::new());
        for item in shared::catalog::sample_products().unwrap() {
            store.create_product(&item).await.unwrap();
        }
        let catalog = service(store.clone()).await;

        run(Cli::parse_from(["products-manager", "tag"]), &catalog)
            .await
            .unwrap();

        let products = store.products().await;
        assert_eq!(products.len(), 12);
        assert_eq!(products.iter().filter(|p| p.featured).count(), 6);
    }

    #[tokio::test]
    async fn storage_failure_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_failing(true);
        let catalog = service(store).await;

        let result = run(Cli::parse_from(["products-manager", "update"]), &catalog).await;

        assert!(result.is_err());
    }
}
